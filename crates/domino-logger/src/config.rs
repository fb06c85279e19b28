//! Runtime configuration read from the process environment
//!
//! | variable       | meaning |
//! |----------------|---------|
//! | `DOMINO_ENV`   | `production` selects direct output; anything else is development |
//! | `DEBUG`        | debug-channel filter, e.g. `app:*,-app:verbose` |
//! | `DEBUG_COLORS` | force colored debug output on or off |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub mod keys {
    pub const ENVIRONMENT: &str = "DOMINO_ENV";
    pub const DEBUG: &str = "DEBUG";
    pub const DEBUG_COLORS: &str = "DEBUG_COLORS";
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        if s.trim() == "production" {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Settings shared by every logger a factory creates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    pub environment: Environment,

    /// Debug-channel filter spec
    pub debug: String,

    /// Colored debug output; detected from the terminal when unset
    pub colors: Option<bool>,
}

impl RuntimeConfig {
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            ..Self::default()
        }
    }

    /// Development settings with the given debug filter
    pub fn development(debug: impl Into<String>) -> Self {
        Self {
            environment: Environment::Development,
            debug: debug.into(),
            colors: None,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup(keys::ENVIRONMENT)
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let colors = match lookup(keys::DEBUG_COLORS) {
            Some(value) => Some(parse_bool(keys::DEBUG_COLORS, &value)?),
            None => None,
        };

        Ok(Self {
            environment,
            debug: lookup(keys::DEBUG).unwrap_or_default(),
            colors,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
