//! Channel registry - one debug channel per namespace

use std::collections::HashMap;
use std::io::IsTerminal;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{DebugChannel, DebugFilter};
use crate::config::RuntimeConfig;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<ChannelRegistry> = Arc::new(ChannelRegistry::from_env());
}

/// Namespace → channel cache
///
/// Channels are created on first use and live as long as the registry; there
/// is no eviction. The process-wide instance lives until exit.
pub struct ChannelRegistry {
    filter: DebugFilter,
    use_colors: bool,
    channels: RwLock<HashMap<String, Arc<DebugChannel>>>,
}

impl ChannelRegistry {
    pub fn new(filter: DebugFilter, use_colors: bool) -> Self {
        Self {
            filter,
            use_colors,
            channels: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        let use_colors = config
            .colors
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        Self::new(DebugFilter::parse(&config.debug), use_colors)
    }

    fn from_env() -> Self {
        let config = RuntimeConfig::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "[ChannelRegistry] Falling back to default configuration");
            RuntimeConfig::default()
        });
        Self::from_config(&config)
    }

    /// The process-wide registry, configured from the environment on first use
    pub fn global() -> Arc<ChannelRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Get or create the channel for a namespace
    pub fn channel(&self, namespace: &str) -> Arc<DebugChannel> {
        // Fast path: channel exists
        if let Some(channel) = self.channels.read().get(namespace) {
            return channel.clone();
        }

        // Slow path: create new channel
        let mut channels = self.channels.write();

        // Double-check (another thread might have created it)
        if let Some(channel) = channels.get(namespace) {
            return channel.clone();
        }

        let enabled = self.filter.is_enabled(namespace);
        debug!(namespace, enabled, "[ChannelRegistry] Created debug channel");

        let channel = Arc::new(DebugChannel::new(namespace, enabled, self.use_colors));
        channels.insert(namespace.to_string(), channel.clone());
        channel
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.channels.read().contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
