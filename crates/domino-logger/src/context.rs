//! Request context - the per-request value threaded through log calls
//!
//! The facade treats the context as opaque: it is handed to formatters and
//! attached to error events. Buffered loggers additionally park rendered lines
//! and request fields on it until the request is flushed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde_json::Value;

use crate::split::Extra;

lazy_static! {
    /// Differs per process so ids from two runs rarely line up
    static ref ID_OFFSET: u64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
        ^ u64::from(std::process::id());
}

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(0);

/// Odd step; multiplying by it permutes the 24-bit id space.
const ID_STEP: u64 = 0x9E37_79B1;
const ID_MASK: u64 = 0xFF_FFFF;

/// Six lowercase hex characters, unique within the first 2^24 ids of a process.
pub fn generate_request_id() -> String {
    let sequence = NEXT_REQUEST.fetch_add(1, Ordering::Relaxed);
    let id = ID_OFFSET.wrapping_add(sequence.wrapping_mul(ID_STEP)) & ID_MASK;
    format!("{:06x}", id)
}

/// Lines and fields accumulated for one request
#[derive(Debug, Default)]
struct RequestBuffer {
    lines: Vec<String>,
    fields: Option<Extra>,
}

/// Context for a single unit of work
#[derive(Debug)]
pub struct RequestContext {
    /// Request ID (6 hex chars unless supplied)
    pub request_id: String,
    /// Arbitrary request data for custom formatters
    pub attributes: Extra,
    buffer: Mutex<RequestBuffer>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::with_request_id(generate_request_id())
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            attributes: Extra::new(),
            buffer: Mutex::new(RequestBuffer::default()),
        }
    }

    /// Attach a request attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub(crate) fn push_line(&self, line: String) {
        self.buffer.lock().lines.push(line);
    }

    /// Number of lines waiting for the next flush
    pub fn pending_lines(&self) -> usize {
        self.buffer.lock().lines.len()
    }

    /// Merge fields into the request's field map
    pub(crate) fn merge_fields(&self, fields: Extra) {
        let mut buffer = self.buffer.lock();
        buffer.fields.get_or_insert_with(Extra::new).extend(fields);
    }

    /// Snapshot of the request fields
    pub fn fields(&self) -> Option<Extra> {
        self.buffer.lock().fields.clone()
    }

    /// Copy of the pending lines and the current fields
    pub(crate) fn snapshot(&self) -> (Vec<String>, Option<Extra>) {
        let buffer = self.buffer.lock();
        (buffer.lines.clone(), buffer.fields.clone())
    }

    /// Drop the oldest `count` pending lines. Fields are kept.
    pub(crate) fn discard_lines(&self, count: usize) {
        let mut buffer = self.buffer.lock();
        let count = count.min(buffer.lines.len());
        buffer.lines.drain(..count);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
