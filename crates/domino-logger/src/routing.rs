//! Severity routing
//!
//! Maps a facade method onto the output stream it writes to, whether it raises
//! an error event, and the fully qualified namespace of the line.
//!
//! | method            | stream    | error event |
//! |-------------------|-----------|-------------|
//! | `info`, `infoNS`  | primary   | no          |
//! | `warn`, `warnNS`  | secondary | no          |
//! | `log`, `logNS`    | secondary | no          |
//! | `error`, `errorNS`| secondary | yes         |

/// Severity of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Log,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Log => "log",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination stream of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    /// Standard output when writing directly.
    Primary,
    /// Standard error when writing directly.
    Secondary,
}

/// Facade method that originated a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogMethod {
    Info,
    InfoNs,
    Warn,
    WarnNs,
    Error,
    ErrorNs,
    Log,
    LogNs,
}

impl LogMethod {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Info | Self::InfoNs => Severity::Info,
            Self::Warn | Self::WarnNs => Severity::Warn,
            Self::Error | Self::ErrorNs => Severity::Error,
            Self::Log | Self::LogNs => Severity::Log,
        }
    }

    /// Whether the caller supplies its own namespace segment.
    pub fn is_namespaced(&self) -> bool {
        matches!(
            self,
            Self::InfoNs | Self::WarnNs | Self::ErrorNs | Self::LogNs
        )
    }

    pub fn stream(&self) -> OutputStream {
        match self.severity() {
            Severity::Info => OutputStream::Primary,
            Severity::Warn | Severity::Error | Severity::Log => OutputStream::Secondary,
        }
    }

    pub fn emits_error_event(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Namespaces a call can be qualified against.
#[derive(Debug, Clone, Copy)]
pub struct Namespaces<'a> {
    /// Root namespace of the factory (`app`).
    pub root: &'a str,
    /// Namespace of the facade instance (`app` or `app:api`).
    pub instance: &'a str,
}

/// Routing decision for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub severity: Severity,
    pub stream: OutputStream,
    pub emits_error_event: bool,
    /// Fully qualified namespace; never a bare method name.
    pub namespace: String,
}

/// Route a call.
///
/// Plain methods qualify the instance namespace with the severity name. The
/// `*Ns` methods qualify the root namespace with the caller's segment, used
/// verbatim. A namespaced method called without a segment falls back to the
/// plain form.
pub fn route(method: LogMethod, namespaces: Namespaces<'_>, segment: Option<&str>) -> Route {
    let severity = method.severity();
    let namespace = match (method.is_namespaced(), segment) {
        (true, Some(segment)) => format!("{}:{}", namespaces.root, segment),
        _ => format!("{}:{}", namespaces.instance, severity.as_str()),
    };

    Route {
        severity,
        stream: method.stream(),
        emits_error_event: method.emits_error_event(),
        namespace,
    }
}
