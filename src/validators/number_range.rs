//! Numeric range check
//!
//! Params: `min`, `max` (inclusive), `skip_if_empty`. A missing value
//! fails unless `skip_if_empty`; without any bound the check declines.

use serde_json::Value;

use super::params::{flag, Range};
use crate::rules::{Params, ValidatorOutcome};

pub fn number_range(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    if value.is_null() {
        return if flag(params, "skip_if_empty") {
            None
        } else {
            Some(false)
        };
    }

    let range = Range::from_params(params)?;
    if range.is_unbounded() {
        return None;
    }

    match value.as_f64() {
        Some(n) => Some(range.contains(n)),
        None => Some(false),
    }
}
