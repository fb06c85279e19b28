//! # Domino Logger
//!
//! Per-request logging facade whose output depends on the runtime environment.
//!
//! ## Modules
//!
//! - `split` / `printf` - turn call arguments into a message plus optional payload
//! - `routing` - severity → output stream, error event, qualified namespace
//! - `formatter` - default line format and the pluggable formatter type
//! - `strategy` - direct, debug-channel and buffered output
//! - `channel` - namespace-filtered debug channels for development
//! - `error_events` - error events raised by error-classified calls
//! - `logger` / `factory` - the facade and its root factory
//!
//! ## Usage
//!
//! ```ignore
//! use domino_logger::{args, LoggerFactory, LoggerOptions};
//!
//! let factory = LoggerFactory::from_env("app")?;
//! let logger = factory.create(LoggerOptions::new().with_namespace("API"));
//!
//! logger.info(args!["served %s in %dms", "/users", 12])?;
//! logger.log(args!["cache miss", {"key": "users:42"}])?;
//! ```

pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod error_events;
pub mod factory;
pub mod formatter;
pub mod logger;
pub mod printf;
pub mod record;
pub mod routing;
pub mod sink;
pub mod split;
pub mod strategy;

pub use channel::{ChannelRegistry, DebugChannel, DebugFilter};
pub use config::{Environment, RuntimeConfig};
pub use context::RequestContext;
pub use error::{ConfigError, LoggerError};
pub use error_events::{ErrorEvent, ErrorReceiver, ErrorSubscribers};
pub use factory::LoggerFactory;
pub use formatter::{default_format, default_formatter, Formatter, TIMESTAMP_FORMAT};
pub use logger::{Logger, LoggerOptions};
pub use record::RequestRecord;
pub use routing::{LogMethod, OutputStream, Route, Severity};
pub use sink::{LogSink, StdioSink};
pub use split::{split_arguments, Extra, SplitResult};
pub use strategy::LogMode;

#[doc(hidden)]
pub use serde_json as __serde_json;

/// Build the argument vector of a log call.
///
/// Each element goes through `serde_json::json!`, so object literals can be
/// written inline. Wrap negative numbers in parentheses.
///
/// ```ignore
/// logger.error(args!["user %s failed", "vasya", {"attempt": 3}])?;
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:tt),* $(,)?) => {
        vec![$($crate::__serde_json::json!($arg)),*]
    };
}
