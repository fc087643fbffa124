//! Rules subsystem
//!
//! Model types, message resolution and the evaluator that applies a rule
//! to located values.

mod evaluator;
mod message;
mod types;

pub use evaluator::{
    evaluate_field, evaluate_post, record_skip, EvaluationContext, SKIP_INACTIVE,
    SKIP_INVALID_RULE, SKIP_INVALID_VALIDATOR, SKIP_VALIDATOR_PANIC,
};
pub use message::resolve_message;
pub use types::{
    Activation, Dynamic, Message, Params, PostValidatorFn, Rule, RuleKind, Severity,
    ValidationModel, Validator, ValidatorFn, ValidatorOutcome,
};
