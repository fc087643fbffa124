//! Substring check
//!
//! Params: `search_string`, `case_sensitive`, `skip_if_empty`. Comparison
//! is case-insensitive unless `case_sensitive` is set.

use serde_json::Value;

use super::params::{flag, str_param};
use crate::rules::{Params, ValidatorOutcome};

pub fn string_contains(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    let s = value.as_str()?;
    let search = str_param(params, "search_string")?;

    if s.is_empty() && flag(params, "skip_if_empty") {
        return None;
    }
    if search.is_empty() {
        return Some(false);
    }

    if flag(params, "case_sensitive") {
        Some(s.contains(search))
    } else {
        Some(s.to_uppercase().contains(&search.to_uppercase()))
    }
}
