//! Debug channels - namespace-scoped output for development
//!
//! One [`DebugChannel`] exists per namespace. Whether it prints is decided
//! once, when the channel is created, by the registry's [`DebugFilter`];
//! lines sent to a disabled channel are dropped without a trace.
//!
//! Colored output (terminals):
//!
//! ```text
//!   app:info What a nice weather today! +3ms
//! ```
//!
//! Plain output (pipes, files):
//!
//! ```text
//! 2024-05-01T10:00:00.000Z app:info What a nice weather today!
//! ```

mod filter;
mod registry;

pub use filter::DebugFilter;
pub use registry::ChannelRegistry;

use std::io;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;

use crate::routing::OutputStream;
use crate::sink::LogSink;

/// ANSI colors handed out to namespaces
const COLORS: [u8; 6] = [6, 2, 3, 4, 5, 1];

/// Output channel for a single namespace
#[derive(Debug)]
pub struct DebugChannel {
    namespace: String,
    enabled: bool,
    use_colors: bool,
    color: u8,
    previous: Mutex<Option<Instant>>,
}

impl DebugChannel {
    pub fn new(namespace: impl Into<String>, enabled: bool, use_colors: bool) -> Self {
        let namespace = namespace.into();
        let color = select_color(&namespace);
        Self {
            namespace,
            enabled,
            use_colors,
            color,
            previous: Mutex::new(None),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    /// Decorate a line for output, or `None` when the channel is disabled.
    pub fn render(&self, line: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let diff = {
            let mut previous = self.previous.lock();
            let diff = previous.map(|p| now.duration_since(p)).unwrap_or_default();
            *previous = Some(now);
            diff
        };

        if self.use_colors {
            let prefix = format!("  \x1b[3{};1m{} \x1b[0m", self.color, self.namespace);
            let body = line
                .split('\n')
                .collect::<Vec<_>>()
                .join(&format!("\n{}", prefix));
            Some(format!(
                "{}{} \x1b[3{}m+{}\x1b[0m",
                prefix,
                body,
                self.color,
                humanize(diff)
            ))
        } else {
            Some(format!(
                "{} {} {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                self.namespace,
                line
            ))
        }
    }

    /// Write a line through `sink`. Returns whether anything was written.
    pub fn emit(&self, sink: &dyn LogSink, line: &str) -> io::Result<bool> {
        match self.render(line) {
            Some(rendered) => {
                sink.write_line(OutputStream::Secondary, &rendered)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Stable color for a namespace
fn select_color(namespace: &str) -> u8 {
    let hash = namespace.chars().fold(0i32, |hash, c| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32)
    });
    COLORS[(hash.unsigned_abs() as usize) % COLORS.len()]
}

/// Short human form of the time since the previous line: `12ms`, `3s`, `2m`
fn humanize(diff: Duration) -> String {
    const SECOND: u128 = 1000;
    const MINUTE: u128 = 60 * SECOND;
    const HOUR: u128 = 60 * MINUTE;
    const DAY: u128 = 24 * HOUR;

    let ms = diff.as_millis();
    let rounded = |unit: u128| (ms + unit / 2) / unit;

    if ms >= DAY {
        format!("{}d", rounded(DAY))
    } else if ms >= HOUR {
        format!("{}h", rounded(HOUR))
    } else if ms >= MINUTE {
        format!("{}m", rounded(MINUTE))
    } else if ms >= SECOND {
        format!("{}s", rounded(SECOND))
    } else {
        format!("{}ms", ms)
    }
}
