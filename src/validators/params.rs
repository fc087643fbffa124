//! Typed access to validator params
//!
//! Builtins read a handful of well-known keys. A flag is set only by a
//! literal `true`; a bound is valid when absent or a JSON number.

use serde_json::Value;

use crate::rules::Params;

/// True only for `"key": true`.
pub(crate) fn flag(params: Option<&Params>, key: &str) -> bool {
    matches!(params.and_then(|p| p.get(key)), Some(Value::Bool(true)))
}

/// `None` when absent or not a string.
pub(crate) fn str_param<'a>(params: Option<&'a Params>, key: &str) -> Option<&'a str> {
    params.and_then(|p| p.get(key)).and_then(Value::as_str)
}

/// Inclusive numeric bounds read from `min` / `max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    /// Reads `min` and `max`. Returns `None` if either is present but
    /// not a number (null included).
    pub fn from_params(params: Option<&Params>) -> Option<Self> {
        Some(Self {
            min: bound(params, "min")?,
            max: bound(params, "max")?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Missing bounds default to `0` and `∞`.
    pub fn contains_len(&self, len: usize) -> bool {
        let len = len as f64;
        len >= self.min.unwrap_or(0.0) && len <= self.max.unwrap_or(f64::INFINITY)
    }

    /// Missing bounds do not constrain.
    pub fn contains(&self, n: f64) -> bool {
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }
}

fn bound(params: Option<&Params>, key: &str) -> Option<Option<f64>> {
    match params.and_then(|p| p.get(key)) {
        None => Some(None),
        Some(v) => v.as_f64().map(Some),
    }
}

/// `null`, `false`, `0` and `""`.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
