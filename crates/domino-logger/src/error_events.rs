//! Error events
//!
//! Every error-classified log call raises exactly one [`ErrorEvent`], inside
//! the call that produced it. A logger keeps its own subscriber list:
//!
//! - [`ErrorSubscribers::subscribe`] hands out a receiver backed by an
//!   unbounded queue, so a reader that falls behind never loses events.
//! - [`ErrorSubscribers::on_error`] registers a handler that runs
//!   synchronously within the log call.
//!
//! Publishing with nobody listening is not a failure. Receivers that were
//! dropped are pruned on the next publish.
//!
//! ```ignore
//! let logger = factory.create(LoggerOptions::default());
//! let mut errors = logger.subscribe();
//!
//! logger.error(args!["Upstream failed: %s", "timeout"])?;
//!
//! let event = errors.try_recv().unwrap();
//! assert_eq!(event.message, "Upstream failed: timeout");
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::context::RequestContext;

/// Raised for every error-classified log call.
///
/// Behaves as an error value: its display text is the log message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ErrorEvent {
    /// Fully qualified namespace of the call
    pub namespace: String,
    /// Rendered message, without any payload
    pub message: String,
    /// Context of the logger that raised the event
    pub context: Option<Arc<RequestContext>>,
}

type Handler = Arc<dyn Fn(&ErrorEvent) + Send + Sync>;

/// Subscribers of one logger's error events
#[derive(Default)]
pub struct ErrorSubscribers {
    queues: Mutex<Vec<mpsc::UnboundedSender<ErrorEvent>>>,
    handlers: Mutex<Vec<Handler>>,
}

impl ErrorSubscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every event published from now on for the returned receiver.
    pub fn subscribe(&self) -> ErrorReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.queues.lock().push(tx);
        ErrorReceiver { queue: rx }
    }

    /// Run `handler` for every event published from now on.
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        self.handlers.lock().push(Arc::new(handler));
    }

    /// Deliver `event` to every live subscriber; returns how many were reached.
    pub fn publish(&self, event: ErrorEvent) -> usize {
        // Handlers may log through the same logger; call them unlocked.
        let handlers: Vec<Handler> = self.handlers.lock().clone();
        for handler in &handlers {
            handler(&event);
        }

        let queued = {
            let mut queues = self.queues.lock();
            queues.retain(|queue| queue.send(event.clone()).is_ok());
            queues.len()
        };

        let reached = handlers.len() + queued;
        trace!(
            namespace = %event.namespace,
            reached,
            "[ErrorEvents] Published error event"
        );
        reached
    }
}

impl std::fmt::Debug for ErrorSubscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorSubscribers")
            .field("queues", &self.queues.lock().len())
            .field("handlers", &self.handlers.lock().len())
            .finish()
    }
}

/// Receiving end of [`ErrorSubscribers::subscribe`]
///
/// Closes once the logger that produced it is dropped and the queue is empty.
#[derive(Debug)]
pub struct ErrorReceiver {
    queue: mpsc::UnboundedReceiver<ErrorEvent>,
}

impl ErrorReceiver {
    /// Wait for the next event; `None` once the logger is gone.
    pub async fn recv(&mut self) -> Option<ErrorEvent> {
        self.queue.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ErrorEvent> {
        self.queue.try_recv().ok()
    }

    /// Every event queued so far, oldest first
    pub fn drain(&mut self) -> Vec<ErrorEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
