//! fieldcheck - A declarative, path-driven validation engine
//!
//! A validation model maps dotted field paths (`user.name`, `items[].tags`,
//! `addresses[0]`) to rules. The engine resolves every path against a
//! `serde_json::Value`, runs the rule's validators on each located value,
//! and collects violations by severity into a `ValidationResult`.
//!
//! # Usage
//!
//! ```ignore
//! use fieldcheck::{validate, validators, Rule, ValidationModel, Validator};
//! use serde_json::json;
//!
//! let mut model = ValidationModel::new();
//! model.insert(
//!     "name",
//!     Rule::field(vec![Validator::new(validators::string_required)
//!         .with_message("Name is required")]),
//! );
//!
//! let result = validate(&json!({ "name": "" }), &model);
//! assert_eq!(result.errors["name"], vec!["Name is required"]);
//! ```

pub mod engine;
pub mod observability;
pub mod path;
pub mod result;
pub mod rules;
pub mod validators;

pub use engine::{validate, EngineConfig, InputError, ValidationEngine};
pub use result::{ResultState, Stats, ValidationResult, Violations};
pub use rules::{
    Activation, Dynamic, Message, Params, PostValidatorFn, Rule, RuleKind, Severity,
    ValidationModel, Validator, ValidatorFn, ValidatorOutcome,
};
