//! Buffered request record

use serde::{Deserialize, Serialize};

use crate::split::Extra;

/// One coalesced record per flushed request (written as a single JSON line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Buffered lines joined with `\n`
    pub message: String,

    /// Request fields, absent when none were set
    #[serde(rename = "@fields", skip_serializing_if = "Option::is_none", default)]
    pub fields: Option<Extra>,
}

impl RequestRecord {
    pub fn new(lines: &[String], fields: Option<Extra>) -> Self {
        Self {
            message: lines.join("\n"),
            fields,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
