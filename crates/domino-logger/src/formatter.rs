//! Line formatting for the direct and buffered modes

use std::sync::Arc;

use chrono::Local;

use crate::context::RequestContext;
use crate::split::Extra;

/// Timestamp layout of the default format (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders `(context, namespace, message, extra)` into one output line.
///
/// The returned string is written verbatim; no line terminator is expected.
pub type Formatter =
    Arc<dyn Fn(Option<&RequestContext>, &str, &str, Option<&Extra>) -> String + Send + Sync>;

/// `<timestamp>\t<namespace>\tpid:<pid>\t<message>[\t<json(extra)>]`
///
/// The payload segment is present only for a non-empty `extra`.
pub fn default_format(
    _context: Option<&RequestContext>,
    namespace: &str,
    message: &str,
    extra: Option<&Extra>,
) -> String {
    let mut line = format!(
        "{}\t{}\tpid:{}\t{}",
        Local::now().format(TIMESTAMP_FORMAT),
        namespace,
        std::process::id(),
        message
    );

    if let Some(extra) = extra.filter(|extra| !extra.is_empty()) {
        line.push('\t');
        line.push_str(&serde_json::to_string(extra).unwrap_or_default());
    }

    line
}

/// The default formatter as a [`Formatter`] value
pub fn default_formatter() -> Formatter {
    Arc::new(default_format)
}
