//! Array length bounds
//!
//! Params: `min`, `max` (inclusive), `skip_if_empty`. Without any bound
//! the check fails.

use serde_json::Value;

use super::params::{flag, Range};
use crate::rules::{Params, ValidatorOutcome};

pub fn array_length(value: &Value, params: Option<&Params>, _data: &Value) -> ValidatorOutcome {
    let items = value.as_array()?;
    let range = Range::from_params(params)?;

    if items.is_empty() && flag(params, "skip_if_empty") {
        return None;
    }
    if range.is_unbounded() {
        return Some(false);
    }
    Some(range.contains_len(items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value, params: Value) -> ValidatorOutcome {
        array_length(&value, params.as_object(), &Value::Null)
    }

    #[test]
    fn test_bounds() {
        assert_eq!(check(json!([1, 2, 3]), json!({ "min": 0, "max": 100 })), Some(true));
        for min in 1..=3 {
            assert_eq!(check(json!([1, 2, 3]), json!({ "min": min })), Some(true));
        }
        assert_eq!(check(json!([1, 2, 3]), json!({ "min": 4 })), Some(false));
        assert_eq!(check(json!([1, 2, 3]), json!({ "max": 3 })), Some(true));
        assert_eq!(check(json!([1, 2, 3]), json!({ "max": 2 })), Some(false));
    }

    #[test]
    fn test_no_bounds_fails() {
        assert_eq!(check(json!([1, 2, 3]), Value::Null), Some(false));
        assert_eq!(check(json!([]), Value::Null), Some(false));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(check(json!([]), json!({ "min": 0 })), Some(true));
        assert_eq!(check(json!([]), json!({ "min": 1 })), Some(false));
        assert_eq!(check(json!([]), json!({ "min": 0, "max": 10 })), Some(true));
        assert_eq!(check(json!([]), json!({ "skip_if_empty": true })), None);
        assert_eq!(
            check(json!([]), json!({ "min": 0, "max": 10, "skip_if_empty": true })),
            None
        );
    }

    #[test]
    fn test_invalid_inputs_decline() {
        assert_eq!(check(json!(42), json!({ "min": 0, "max": 10 })), None);
        assert_eq!(check(json!({}), json!({ "min": 0, "max": 10 })), None);
        assert_eq!(check(json!([1]), json!({ "min": "0" })), None);
    }
}
