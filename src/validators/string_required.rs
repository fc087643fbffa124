//! Non-blank string check
//!
//! Params: `allow_whitespace` accepts whitespace-only strings.

use serde_json::Value;

use super::params::{flag, is_falsy};
use crate::rules::{Params, ValidatorOutcome};

pub fn string_required(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    if is_falsy(value) {
        return Some(false);
    }
    let Some(s) = value.as_str() else {
        return Some(false);
    };
    if flag(params, "allow_whitespace") {
        return Some(true);
    }
    Some(s.chars().any(|c| !c.is_whitespace()))
}
