//! Result subsystem
//!
//! The accumulator threaded through one evaluation, plus read-only
//! helpers that inspect a finished result.

pub mod query;
mod types;

pub use query::PathQuery;
pub use types::{ResultState, Stats, ValidationResult, Violations};
