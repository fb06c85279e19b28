//! Error types for the logging facade

use std::io;

/// Failure of a single log call.
///
/// Logging never retries and never swallows a failed write: the error is
/// handed back to the call site.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The output writer rejected the rendered line.
    #[error("failed to write log line for {namespace}: {source}")]
    Write {
        namespace: String,
        #[source]
        source: io::Error,
    },

    /// A buffered request record could not be serialized.
    #[error("failed to serialize request record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LoggerError {
    pub(crate) fn write(namespace: &str, source: io::Error) -> Self {
        Self::Write {
            namespace: namespace.to_string(),
            source,
        }
    }
}

/// Invalid value found while reading runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected a boolean")]
    InvalidBool { key: String, value: String },
}

pub type Result<T, E = LoggerError> = std::result::Result<T, E>;
