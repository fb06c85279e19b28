//! Logger facade
//!
//! Every call runs the whole pipeline before returning:
//!
//! ```text
//! args ─▶ split ─▶ route ─▶ strategy (format / channel / buffer) ─▶ error event
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::context::RequestContext;
use crate::error::{LoggerError, Result};
use crate::error_events::{ErrorEvent, ErrorReceiver, ErrorSubscribers};
use crate::formatter::Formatter;
use crate::record::RequestRecord;
use crate::routing::{route, LogMethod, Namespaces, OutputStream};
use crate::sink::LogSink;
use crate::split::{split_arguments, Extra};
use crate::strategy::{LogMode, Strategy};

/// Options for one logger instance
#[derive(Clone)]
pub struct LoggerOptions {
    /// Request context handed to formatters and error events
    pub context: Option<Arc<RequestContext>>,
    /// Line formatter; the default format when unset
    pub format: Option<Formatter>,
    /// Instance namespace segment, lower-cased under the root namespace
    pub namespace: Option<String>,
    /// Raise error events for error-classified calls
    pub emit_errors: bool,
    /// Buffer lines on the request context until `log_request`
    pub buffered: bool,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: Arc<RequestContext>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(Option<&RequestContext>, &str, &str, Option<&Extra>) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn emit_errors(mut self, enabled: bool) -> Self {
        self.emit_errors = enabled;
        self
    }

    pub fn buffered(mut self, enabled: bool) -> Self {
        self.buffered = enabled;
        self
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            context: None,
            format: None,
            namespace: None,
            emit_errors: true,
            buffered: false,
        }
    }
}

impl std::fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("context", &self.context.as_ref().map(|c| c.request_id.as_str()))
            .field("custom_format", &self.format.is_some())
            .field("namespace", &self.namespace)
            .field("emit_errors", &self.emit_errors)
            .field("buffered", &self.buffered)
            .finish()
    }
}

/// Per-request logging facade
///
/// Created by [`LoggerFactory::create`](crate::LoggerFactory::create); its
/// namespace, mode and context are fixed for its whole lifetime.
pub struct Logger {
    root_namespace: String,
    namespace: String,
    context: Option<Arc<RequestContext>>,
    emit_errors: bool,
    strategy: Strategy,
    sink: Arc<dyn LogSink>,
    errors: ErrorSubscribers,
}

impl Logger {
    pub(crate) fn new(
        root_namespace: String,
        namespace: String,
        context: Option<Arc<RequestContext>>,
        emit_errors: bool,
        strategy: Strategy,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            root_namespace,
            namespace,
            context,
            emit_errors,
            strategy,
            sink,
            errors: ErrorSubscribers::new(),
        }
    }

    pub fn info(&self, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::Info, None, args)
    }

    pub fn info_ns(&self, namespace: &str, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::InfoNs, Some(namespace), args)
    }

    pub fn warn(&self, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::Warn, None, args)
    }

    pub fn warn_ns(&self, namespace: &str, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::WarnNs, Some(namespace), args)
    }

    pub fn error(&self, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::Error, None, args)
    }

    pub fn error_ns(&self, namespace: &str, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::ErrorNs, Some(namespace), args)
    }

    /// Warn-class: secondary stream, no error event.
    pub fn log(&self, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::Log, None, args)
    }

    pub fn log_ns(&self, namespace: &str, args: Vec<Value>) -> Result<()> {
        self.dispatch(LogMethod::LogNs, Some(namespace), args)
    }

    /// Run one call through split, route, strategy and error event.
    pub fn dispatch(&self, method: LogMethod, segment: Option<&str>, args: Vec<Value>) -> Result<()> {
        let split = split_arguments(args);
        let route = route(
            method,
            Namespaces {
                root: &self.root_namespace,
                instance: &self.namespace,
            },
            segment,
        );

        self.strategy
            .emit(self.sink.as_ref(), self.context.as_ref(), &route, &split)?;

        if route.emits_error_event && self.emit_errors {
            self.errors.publish(ErrorEvent {
                namespace: route.namespace,
                message: split.message,
                context: self.context.clone(),
            });
        }

        Ok(())
    }

    /// Queue this logger's error events for a new receiver
    pub fn subscribe(&self) -> ErrorReceiver {
        self.errors.subscribe()
    }

    /// Call `handler` synchronously for each of this logger's error events
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        self.errors.on_error(handler);
    }

    /// Merge fields into the request record (buffered loggers only)
    pub fn fields(&self, fields: Extra) {
        match (self.strategy.mode(), &self.context) {
            (LogMode::Buffered, Some(context)) => context.merge_fields(fields),
            _ => debug!(
                namespace = %self.namespace,
                "[Logger] Ignoring fields outside a buffered request"
            ),
        }
    }

    /// Write the buffered lines as one record and clear them (buffered loggers only)
    ///
    /// Nothing is written when no lines are pending. The lines are cleared only
    /// after the write succeeded.
    pub fn log_request(&self) -> Result<()> {
        let context = match (self.strategy.mode(), &self.context) {
            (LogMode::Buffered, Some(context)) => context,
            _ => return Ok(()),
        };

        let (lines, fields) = context.snapshot();
        if lines.is_empty() {
            return Ok(());
        }

        let record = RequestRecord::new(&lines, fields).to_json()?;
        self.sink
            .write_line(OutputStream::Primary, &record)
            .map_err(|e| LoggerError::write(&self.namespace, e))?;

        context.discard_lines(lines.len());
        debug!(
            request_id = %context.request_id,
            lines = lines.len(),
            "[Logger] Flushed request record"
        );
        Ok(())
    }

    /// Instance namespace (`app` or `app:api`)
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn mode(&self) -> LogMode {
        self.strategy.mode()
    }

    pub fn context(&self) -> Option<&Arc<RequestContext>> {
        self.context.as_ref()
    }

    pub fn emits_errors(&self) -> bool {
        self.emit_errors
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .field("mode", &self.mode())
            .field("emit_errors", &self.emit_errors)
            .finish()
    }
}
