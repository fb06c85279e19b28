//! Shared test utilities and fixtures for domino-logger integration tests.

pub use domino_logger::{
    ErrorEvent, ErrorReceiver, LogMode, Logger, LoggerFactory, LoggerOptions, OutputStream,
    RequestContext, RuntimeConfig,
};

/// Mock sink implementations
pub mod mocks;
pub use mocks::{ClosedSink, MemorySink};

/// Event testing utilities
pub mod events {
    use domino_logger::{ErrorEvent, ErrorReceiver};
    use std::time::Duration;

    /// Collect events from a receiver until the timeout elapses
    pub async fn collect_events(rx: &mut ErrorReceiver, timeout: Duration) -> Vec<ErrorEvent> {
        let mut events = Vec::new();
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }

            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break, // Channel closed
                Err(_) => break,   // Timeout
            }
        }

        events
    }

    /// Wait for the first event, if any arrives in time
    pub async fn first_event(rx: &mut ErrorReceiver, timeout: Duration) -> Option<ErrorEvent> {
        tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
    }

    /// Wait window used by event assertions
    pub const EVENT_WINDOW: Duration = Duration::from_millis(300);
}

/// Test fixture utilities
pub mod fixtures {
    use super::*;
    use domino_logger::{ChannelRegistry, DebugFilter};
    use std::sync::Arc;

    /// Root namespace used throughout the tests
    pub const APP_NAME: &str = "domino-logger";

    /// Factory in production mode writing into `sink`
    pub fn production_factory(sink: Arc<MemorySink>) -> LoggerFactory {
        LoggerFactory::new(APP_NAME, RuntimeConfig::production()).with_sink(sink)
    }

    /// Factory in development mode with every debug channel enabled, plain output
    pub fn development_factory(sink: Arc<MemorySink>) -> LoggerFactory {
        development_factory_with_filter(sink, "*")
    }

    /// Factory in development mode with a specific debug filter, plain output
    pub fn development_factory_with_filter(sink: Arc<MemorySink>, debug: &str) -> LoggerFactory {
        let channels = Arc::new(ChannelRegistry::new(DebugFilter::parse(debug), false));
        LoggerFactory::new(APP_NAME, RuntimeConfig::development(debug))
            .with_sink(sink)
            .with_channels(channels)
    }

    /// Drop the leading timestamp of a formatted line
    pub fn strip_timestamp(line: &str) -> &str {
        line.split_once('\t').map(|(_, rest)| rest).unwrap_or(line)
    }
}
