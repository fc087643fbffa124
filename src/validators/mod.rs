//! Builtin validators
//!
//! Plain functions with the validator signature, reachable by name through
//! [`builtin`] or `Validator::builtin`. Each reads its settings from the
//! validator params; see the module of each function for the keys.

mod array_length;
mod email;
mod number_range;
pub(crate) mod params;
mod string_contains;
mod string_length;
mod string_pattern;
mod string_required;

use serde_json::Value;

use crate::rules::{Params, ValidatorOutcome};

pub use array_length::array_length;
pub use email::email;
pub use number_range::number_range;
pub use string_contains::string_contains;
pub use string_length::string_length;
pub use string_pattern::string_pattern;
pub use string_required::string_required;

/// Signature shared by every builtin.
pub type BuiltinFn = fn(&Value, Option<&Params>, &Value) -> ValidatorOutcome;

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: [&str; 7] = [
    "string_required",
    "string_length",
    "string_pattern",
    "string_contains",
    "number_range",
    "array_length",
    "email",
];

/// Looks up a builtin by name.
pub fn builtin(name: &str) -> Option<BuiltinFn> {
    let f: BuiltinFn = match name {
        "string_required" => string_required,
        "string_length" => string_length,
        "string_pattern" => string_pattern,
        "string_contains" => string_contains,
        "number_range" => number_range,
        "array_length" => array_length,
        "email" => email,
        _ => return None,
    };
    Some(f)
}
