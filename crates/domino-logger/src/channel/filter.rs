//! Namespace filter for debug channels
//!
//! A filter is a list of patterns separated by commas or whitespace.
//! `*` matches any run of characters and a leading `-` excludes matching
//! namespaces:
//!
//! ```text
//! DEBUG=app:*            everything under app
//! DEBUG=*,-app:verbose   everything except app:verbose
//! ```
//!
//! A namespace is enabled when it matches no exclusion and at least one
//! inclusion. An empty filter enables nothing.

use regex::Regex;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct DebugFilter {
    names: Vec<Regex>,
    skips: Vec<Regex>,
}

impl DebugFilter {
    pub fn parse(directives: &str) -> Self {
        let mut filter = Self::default();

        for pattern in directives
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (negated, pattern) = match pattern.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, pattern),
            };

            let Some(regex) = compile(pattern) else {
                continue;
            };

            if negated {
                filter.skips.push(regex);
            } else {
                filter.names.push(regex);
            }
        }

        filter
    }

    /// Filter that enables every namespace
    pub fn all() -> Self {
        Self::parse("*")
    }

    /// Filter that enables nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, namespace: &str) -> bool {
        if self.skips.iter().any(|re| re.is_match(namespace)) {
            return false;
        }
        self.names.iter().any(|re| re.is_match(namespace))
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    let source = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*?"));
    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, error = %e, "[DebugFilter] Ignoring unusable pattern");
            None
        }
    }
}
