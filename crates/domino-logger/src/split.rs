//! Argument splitting
//!
//! A log call takes a template plus arguments. The last argument may be a
//! structured payload meant for the formatter rather than for the template;
//! this module decides which one it is.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::printf::format_args;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"(?i)%(s|d|j|%)").unwrap();
}

/// Structured key-value payload attached to a log call.
pub type Extra = Map<String, Value>;

/// Message text plus the optional payload pulled off a call's arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitResult {
    pub message: String,
    pub extra: Option<Extra>,
}

impl SplitResult {
    /// The payload, if one was extracted and it has at least one key.
    ///
    /// An empty object still counts as extracted (it is not rendered into the
    /// message) but must never be rendered as a payload either.
    pub fn payload(&self) -> Option<&Extra> {
        self.extra.as_ref().filter(|extra| !extra.is_empty())
    }
}

/// Count placeholder tokens in a template.
pub fn count_placeholders(template: &str) -> usize {
    PLACEHOLDER_REGEX.find_iter(template).count()
}

/// Separate the rendered message from a trailing payload object.
///
/// The last argument is treated as a payload only when it is a JSON object and
/// the template cannot consume it: either the template has no placeholders at
/// all, or it has fewer placeholders than arguments following it.
pub fn split_arguments(mut args: Vec<Value>) -> SplitResult {
    let mut extra = None;

    if args.len() > 1 {
        let placeholders = match &args[0] {
            Value::String(template) => count_placeholders(template),
            _ => 0,
        };

        let has_excess_with_payload = placeholders > 0 && args.len() - 1 > placeholders;
        let has_no_placeholders_with_payload = placeholders == 0;

        if has_excess_with_payload || has_no_placeholders_with_payload {
            if let Some(Value::Object(_)) = args.last() {
                if let Some(Value::Object(map)) = args.pop() {
                    extra = Some(map);
                }
            }
        }
    }

    SplitResult {
        message: format_args(&args),
        extra,
    }
}
