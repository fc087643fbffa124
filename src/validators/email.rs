//! Email address shape check
//!
//! Params: `skip_if_empty`. Only the address shape is checked, nothing is
//! resolved.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::params::{flag, is_falsy};
use crate::rules::{Params, ValidatorOutcome};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is valid")
});

pub fn email(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    if is_falsy(value) {
        return if flag(params, "skip_if_empty") {
            None
        } else {
            Some(false)
        };
    }
    let s = value.as_str()?;
    Some(EMAIL.is_match(s))
}
