//! Engine error types
//!
//! Input guard failures are not returned as `Err`: `validate()` always
//! produces a result, and a failed guard becomes `state = internal error`
//! with the error's display text in `result.error`.

use std::io;

use serde_json::Value;
use thiserror::Error;

use crate::rules::ValidationModel;
use crate::validators::params::is_falsy;

/// Reasons the inputs to `validate()` are rejected, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// Data absent or falsy (`null`, `false`, `0`, `""`)
    #[error("No data")]
    NoData,

    #[error("No Validation Model")]
    NoModel,

    /// Data present but not a non-empty JSON object
    #[error("Empty/invalid data")]
    InvalidData,

    #[error("Empty/invalid Validation Model")]
    InvalidModel,
}

impl InputError {
    /// Runs the guard checks top-down; the first failure wins.
    pub fn check<'a>(
        data: Option<&'a Value>,
        model: Option<&'a ValidationModel>,
    ) -> Result<(&'a Value, &'a ValidationModel), InputError> {
        let data = data.filter(|d| !is_falsy(d)).ok_or(InputError::NoData)?;
        let model = model.ok_or(InputError::NoModel)?;

        if !data.as_object().map_or(false, |obj| !obj.is_empty()) {
            return Err(InputError::InvalidData);
        }
        if model.is_empty() {
            return Err(InputError::InvalidModel);
        }

        Ok((data, model))
    }
}

/// Engine configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
