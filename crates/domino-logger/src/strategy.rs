//! Output strategies
//!
//! A logger picks one strategy when it is created and keeps it:
//!
//! - `Direct` renders through the formatter and writes immediately.
//! - `DebugChannel` skips the formatter and hands `message [json(extra)]` to the
//!   namespace's debug channel.
//! - `Buffered` renders through the formatter and parks the line on the
//!   request context until the request is flushed; without a context it
//!   behaves like `Direct`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelRegistry;
use crate::context::RequestContext;
use crate::error::{LoggerError, Result};
use crate::formatter::Formatter;
use crate::routing::Route;
use crate::sink::LogSink;
use crate::split::SplitResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogMode {
    Direct,
    DebugChannel,
    Buffered,
}

impl LogMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::DebugChannel => "debug-channel",
            Self::Buffered => "buffered",
        }
    }
}

pub(crate) enum Strategy {
    Direct { formatter: Formatter },
    DebugChannel { channels: Arc<ChannelRegistry> },
    Buffered { formatter: Formatter },
}

impl Strategy {
    pub(crate) fn mode(&self) -> LogMode {
        match self {
            Self::Direct { .. } => LogMode::Direct,
            Self::DebugChannel { .. } => LogMode::DebugChannel,
            Self::Buffered { .. } => LogMode::Buffered,
        }
    }

    pub(crate) fn emit(
        &self,
        sink: &dyn LogSink,
        context: Option<&Arc<RequestContext>>,
        route: &Route,
        split: &SplitResult,
    ) -> Result<()> {
        match self {
            Self::Direct { formatter } => {
                let line = formatter(
                    context.map(Arc::as_ref),
                    &route.namespace,
                    &split.message,
                    split.payload(),
                );
                write(sink, route, &line)
            }
            Self::DebugChannel { channels } => {
                let line = debug_line(split);
                channels
                    .channel(&route.namespace)
                    .emit(sink, &line)
                    .map(|_| ())
                    .map_err(|e| LoggerError::write(&route.namespace, e))
            }
            Self::Buffered { formatter } => {
                let line = formatter(
                    context.map(Arc::as_ref),
                    &route.namespace,
                    &split.message,
                    split.payload(),
                );
                match context {
                    Some(context) => {
                        context.push_line(line);
                        Ok(())
                    }
                    None => write(sink, route, &line),
                }
            }
        }
    }
}

fn write(sink: &dyn LogSink, route: &Route, line: &str) -> Result<()> {
    sink.write_line(route.stream, line)
        .map_err(|e| LoggerError::write(&route.namespace, e))
}

/// `message` followed by a space and the JSON payload, when there is one
pub fn debug_line(split: &SplitResult) -> String {
    let payload = split
        .payload()
        .and_then(|extra| serde_json::to_string(extra).ok());

    [Some(split.message.clone()), payload]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
