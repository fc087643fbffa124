//! Validation engine
//!
//! Checks inputs, runs field rules then aggregate rules, and returns a
//! `ValidationResult`. Configuration controls panic handling and logging.

mod config;
mod errors;
mod orchestrator;

pub use config::EngineConfig;
pub use errors::{ConfigError, ConfigResult, InputError};
pub use orchestrator::{validate, ValidationEngine};
