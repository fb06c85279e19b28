//! Output writers

use std::io::{self, Write};

use crate::routing::OutputStream;

/// Destination for rendered lines.
///
/// Implementations append the line terminator themselves; lines handed over
/// never carry one.
pub trait LogSink: Send + Sync {
    fn write_line(&self, stream: OutputStream, line: &str) -> io::Result<()>;
}

/// Writes primary lines to stdout and secondary lines to stderr, flushing
/// after every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

impl LogSink for StdioSink {
    fn write_line(&self, stream: OutputStream, line: &str) -> io::Result<()> {
        match stream {
            OutputStream::Primary => write_flushed(io::stdout().lock(), line),
            OutputStream::Secondary => write_flushed(io::stderr().lock(), line),
        }
    }
}

fn write_flushed(mut out: impl Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
