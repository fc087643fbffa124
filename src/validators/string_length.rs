//! String length bounds
//!
//! Params: `min`, `max` (inclusive, counted in characters), `trim`,
//! `skip_if_empty`. Without any bound the check fails.

use serde_json::Value;

use super::params::{flag, Range};
use crate::rules::{Params, ValidatorOutcome};

pub fn string_length(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    let s = value.as_str()?;
    let range = Range::from_params(params)?;

    let s = if flag(params, "trim") { s.trim() } else { s };
    if s.is_empty() && flag(params, "skip_if_empty") {
        return None;
    }
    if range.is_unbounded() {
        return Some(false);
    }
    Some(range.contains_len(s.chars().count()))
}
