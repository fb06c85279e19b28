//! Root factory
//!
//! A factory owns the root namespace and the runtime mode; every logger it
//! creates shares both, plus the output sink and the debug-channel registry.

use std::sync::Arc;

use tracing::debug;

use crate::channel::ChannelRegistry;
use crate::config::RuntimeConfig;
use crate::error::ConfigError;
use crate::formatter::default_formatter;
use crate::logger::{Logger, LoggerOptions};
use crate::sink::{LogSink, StdioSink};
use crate::strategy::{LogMode, Strategy};

pub struct LoggerFactory {
    root_namespace: String,
    config: RuntimeConfig,
    sink: Arc<dyn LogSink>,
    channels: Arc<ChannelRegistry>,
}

impl LoggerFactory {
    /// Create a factory with explicit settings.
    ///
    /// The factory gets its own channel registry built from `config`; loggers
    /// from the same factory share channels.
    pub fn new(root_namespace: impl Into<String>, config: RuntimeConfig) -> Self {
        let channels = Arc::new(ChannelRegistry::from_config(&config));
        Self {
            root_namespace: root_namespace.into(),
            config,
            sink: Arc::new(StdioSink),
            channels,
        }
    }

    /// Create a factory configured from the process environment.
    ///
    /// Uses the process-wide channel registry.
    pub fn from_env(root_namespace: impl Into<String>) -> Result<Self, ConfigError> {
        let config = RuntimeConfig::from_env()?;
        Ok(Self::new(root_namespace, config).with_channels(ChannelRegistry::global()))
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_channels(mut self, channels: Arc<ChannelRegistry>) -> Self {
        self.channels = channels;
        self
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn channels(&self) -> &Arc<ChannelRegistry> {
        &self.channels
    }

    /// Mode a logger created with `options` would use
    pub fn mode_for(&self, options: &LoggerOptions) -> LogMode {
        if options.buffered {
            LogMode::Buffered
        } else if self.config.environment.is_production() {
            LogMode::Direct
        } else {
            LogMode::DebugChannel
        }
    }

    /// `root` or `root:<namespace lower-cased>`
    pub fn instance_namespace(&self, namespace: Option<&str>) -> String {
        match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("{}:{}", self.root_namespace, ns.to_lowercase()),
            None => self.root_namespace.clone(),
        }
    }

    /// Create a logger for one unit of work.
    pub fn create(&self, options: LoggerOptions) -> Logger {
        let mode = self.mode_for(&options);
        let namespace = self.instance_namespace(options.namespace.as_deref());
        let formatter = options.format.unwrap_or_else(default_formatter);

        let strategy = match mode {
            LogMode::Direct => Strategy::Direct { formatter },
            LogMode::DebugChannel => Strategy::DebugChannel {
                channels: self.channels.clone(),
            },
            LogMode::Buffered => Strategy::Buffered { formatter },
        };

        debug!(
            namespace = %namespace,
            mode = mode.as_str(),
            "[LoggerFactory] Created logger"
        );

        Logger::new(
            self.root_namespace.clone(),
            namespace,
            options.context,
            options.emit_errors,
            strategy,
            self.sink.clone(),
        )
    }
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("root_namespace", &self.root_namespace)
            .field("config", &self.config)
            .finish()
    }
}
