//! Engine configuration
//!
//! Defaults: validator panics are caught and recorded as skips, logging
//! is off. A config can be built in code or read from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use crate::observability::LoggingConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Record a panicking validator as a `[validator panic]` skip instead
    /// of unwinding out of `validate()`.
    ///
    /// The process panic hook is left alone, so a caught panic is still
    /// reported by it (the default hook prints to stderr). Install a
    /// quiet hook with `std::panic::set_hook` if that output is unwanted.
    pub catch_validator_panics: bool,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catch_validator_panics: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validator panics unwind to the caller.
    pub fn propagate_panics() -> Self {
        Self {
            catch_validator_panics: false,
            ..Self::default()
        }
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}
