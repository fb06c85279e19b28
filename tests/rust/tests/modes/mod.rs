//! Output mode integration tests
//!
//! - direct: production, formatter output on stdout/stderr
//! - debug_channel: development, namespace-filtered debug channels
//! - buffered: one JSON record per request

mod buffered;
mod debug_channel;
