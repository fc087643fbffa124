//! Regular expression match
//!
//! Params: `pattern` (regex source), `case_insensitive`, `skip_if_empty`.
//! A missing or uncompilable pattern declines to judge. Compiled patterns
//! are cached process-wide, so fan-out over many elements compiles once.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::params::{flag, str_param};
use crate::rules::{Params, ValidatorOutcome};

/// Cleared when full.
const PATTERN_CACHE_LIMIT: usize = 256;

static PATTERNS: Lazy<Mutex<HashMap<(String, bool), Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    let key = (pattern.to_string(), case_insensitive);
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(&key) {
        return Some(regex.clone());
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .ok()?;
    if cache.len() >= PATTERN_CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(key, regex.clone());
    Some(regex)
}

pub fn string_pattern(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    let s = value.as_str()?;
    let pattern = str_param(params, "pattern")?;
    let regex = compiled(pattern, flag(params, "case_insensitive"))?;

    if s.is_empty() && flag(params, "skip_if_empty") {
        return None;
    }
    Some(regex.is_match(s))
}
