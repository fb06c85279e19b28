//! Mock sinks for testing
//!
//! In-memory replacements for stdout/stderr so tests can assert on exactly
//! what a logger wrote and to which stream.

use std::io;

use parking_lot::Mutex;

use domino_logger::{LogSink, OutputStream};

// ============================================================================
// MemorySink
// ============================================================================

/// Captures every written line, in order
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(OutputStream, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written to stdout in direct mode
    pub fn stdout(&self) -> Vec<String> {
        self.on(OutputStream::Primary)
    }

    /// Lines written to stderr in direct mode
    pub fn stderr(&self) -> Vec<String> {
        self.on(OutputStream::Secondary)
    }

    pub fn on(&self, stream: OutputStream) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, stream: OutputStream, line: &str) -> io::Result<()> {
        self.lines.lock().push((stream, line.to_string()));
        Ok(())
    }
}

// ============================================================================
// ClosedSink
// ============================================================================

/// Behaves like an output stream that has been closed
#[derive(Default)]
pub struct ClosedSink;

impl LogSink for ClosedSink {
    fn write_line(&self, _stream: OutputStream, _line: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "output stream closed"))
    }
}
