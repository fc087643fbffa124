//! Rule evaluation
//!
//! Applies one rule to one located value (field rules) or once to the
//! whole document (aggregate rules), writing violations and skips into
//! the shared result.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use super::message::resolve_message;
use super::types::{PostValidatorFn, Rule, Severity, Validator, ValidatorOutcome};
use crate::observability::{Event, Logger};
use crate::result::ValidationResult;

pub const SKIP_INACTIVE: &str = "[inactive]";
pub const SKIP_INVALID_VALIDATOR: &str = "[invalid validator]";
pub const SKIP_INVALID_RULE: &str = "[overall]";
pub const SKIP_VALIDATOR_PANIC: &str = "[validator panic]";

/// Per-call inputs shared by every evaluation.
pub struct EvaluationContext<'a> {
    pub data: &'a Value,
    /// Convert validator panics into skips instead of unwinding
    pub catch_panics: bool,
    pub logger: &'a Logger,
}

/// Runs a field rule against one located value.
pub fn evaluate_field(
    rule: &Rule,
    validators: &[Validator],
    path: &str,
    value: &Value,
    ctx: &EvaluationContext<'_>,
    result: &mut ValidationResult,
) {
    if !rule.is_active(ctx.data, value) {
        record_skip(result, path, SKIP_INACTIVE, ctx.logger);
        return;
    }

    result.stats.processed_rules += 1;

    for validator in validators {
        let Some(validate) = &validator.validate else {
            record_skip(result, path, SKIP_INVALID_VALIDATOR, ctx.logger);
            continue;
        };

        result.stats.processed_validators += 1;

        let outcome = run_guarded(ctx.catch_panics, || {
            validate(value, validator.params.as_ref(), ctx.data)
        });

        match outcome {
            Err(reason) => record_panic(result, path, &reason, ctx.logger),
            Ok(None) => result.stats.total_skipped += 1,
            Ok(Some(true)) => {}
            Ok(Some(false)) => {
                let level = rule.level.or(validator.level).unwrap_or(Severity::Error);
                if !level.is_violation() {
                    continue;
                }
                let message = resolve_message(
                    validator.message.as_ref(),
                    rule.message.as_ref(),
                    path,
                    ctx.data,
                    value,
                );
                result.record_violation(level, path, message);
            }
        }
    }
}

/// Runs an aggregate rule once against the partial result.
pub fn evaluate_post(
    rule: &Rule,
    postvalidator: &PostValidatorFn,
    path: &str,
    ctx: &EvaluationContext<'_>,
    result: &mut ValidationResult,
) {
    result.stats.processed_rules += 1;

    let outcome = {
        let snapshot: &ValidationResult = result;
        run_guarded(ctx.catch_panics, || postvalidator(ctx.data, snapshot))
    };

    match outcome {
        Err(reason) => record_panic(result, path, &reason, ctx.logger),
        Ok(None) => result.stats.total_skipped += 1,
        Ok(Some(true)) => {}
        Ok(Some(false)) => {
            let level = rule.level.unwrap_or(Severity::Error);
            if level.is_violation() {
                let message =
                    resolve_message(None, rule.message.as_ref(), path, ctx.data, &Value::Null);
                result.record_violation(level, path, message);
            }
        }
    }
}

/// Counts and logs a skip.
pub fn record_skip(result: &mut ValidationResult, path: &str, chunk: &str, logger: &Logger) {
    result.record_skip(path, chunk);
    logger.log(Event::RuleSkipped, &[("path", path), ("reason", chunk)]);
}

fn record_panic(result: &mut ValidationResult, path: &str, reason: &str, logger: &Logger) {
    result.record_skip(path, SKIP_VALIDATOR_PANIC);
    logger.log(Event::ValidatorPanicked, &[("path", path), ("panic", reason)]);
}

fn run_guarded<F>(catch: bool, f: F) -> Result<ValidatorOutcome, String>
where
    F: FnOnce() -> ValidatorOutcome,
{
    if !catch {
        return Ok(f());
    }
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_reason)
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::Params;
    use serde_json::json;

    fn fail(_: &Value, _: Option<&Params>, _: &Value) -> ValidatorOutcome {
        Some(false)
    }

    fn pass(_: &Value, _: Option<&Params>, _: &Value) -> ValidatorOutcome {
        Some(true)
    }

    fn decline(_: &Value, _: Option<&Params>, _: &Value) -> ValidatorOutcome {
        None
    }

    fn run(rule: &Rule, value: &Value, catch_panics: bool) -> ValidationResult {
        let data = json!({ "field": value.clone() });
        let logger = Logger::disabled();
        let ctx = EvaluationContext { data: &data, catch_panics, logger: &logger };
        let mut result = ValidationResult::empty();
        evaluate_field(rule, &rule.validators, "field", value, &ctx, &mut result);
        result
    }

    #[test]
    fn test_failing_validator_records_error() {
        let rule = Rule::field(vec![Validator::new(fail).with_message("bad")]);
        let result = run(&rule, &json!(""), true);

        assert_eq!(result.errors["field"], vec!["bad"]);
        assert_eq!(result.stats.processed_rules, 1);
        assert_eq!(result.stats.processed_validators, 1);
    }

    #[test]
    fn test_pass_and_decline() {
        let rule = Rule::field(vec![Validator::new(pass), Validator::new(decline)]);
        let result = run(&rule, &json!(1), true);

        assert!(result.errors.is_empty());
        assert_eq!(result.stats.processed_validators, 2);
        assert_eq!(result.stats.total_skipped, 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_inactive_rule_is_skipped() {
        let rule = Rule::field(vec![Validator::new(fail)]).with_active(false);
        let result = run(&rule, &json!(""), true);

        assert!(result.errors.is_empty());
        assert_eq!(result.stats.processed_rules, 0);
        assert_eq!(result.stats.total_skipped, 1);
        assert_eq!(result.skipped, vec!["field, [inactive]"]);
    }

    #[test]
    fn test_dynamic_activation_sees_value() {
        let rule = Rule::field(vec![Validator::new(fail)]).with_active_fn(|_, value| value != "John");
        assert!(run(&rule, &json!("John"), true).errors.is_empty());
        assert_eq!(run(&rule, &json!("Joe"), true).errors.len(), 1);
    }

    #[test]
    fn test_invalid_validator_is_skipped_and_rest_run() {
        let rule = Rule::field(vec![Validator::default(), Validator::new(fail)]);
        let result = run(&rule, &json!(""), true);

        assert_eq!(result.skipped, vec!["field, [invalid validator]"]);
        assert_eq!(result.stats.processed_validators, 1);
        assert_eq!(result.errors["field"].len(), 1);
    }

    #[test]
    fn test_rule_level_overrides_validator_level() {
        let rule = Rule::field(vec![Validator::new(fail).with_level(Severity::Notice)])
            .with_level(Severity::Warning);
        let result = run(&rule, &json!(""), true);

        assert!(result.notices.is_empty());
        assert_eq!(result.warnings["field"].len(), 1);
    }

    #[test]
    fn test_validator_level_used_without_rule_level() {
        let rule = Rule::field(vec![Validator::new(fail).with_level(Severity::Notice)]);
        let result = run(&rule, &json!(""), true);
        assert_eq!(result.notices["field"].len(), 1);
    }

    #[test]
    fn test_non_tier_level_is_dropped() {
        let rule = Rule::field(vec![Validator::new(fail)]).with_level(Severity::None);
        let result = run(&rule, &json!(""), true);

        assert!(result.errors.is_empty() && result.warnings.is_empty() && result.notices.is_empty());
        assert_eq!(result.stats.processed_validators, 1);
    }

    #[test]
    fn test_panicking_validator_becomes_skip() {
        let rule = Rule::field(vec![
            Validator::new(|_, _, _| panic!("validator exploded")),
            Validator::new(fail),
        ]);
        let result = run(&rule, &json!(""), true);

        assert_eq!(result.skipped, vec!["field, [validator panic]"]);
        assert_eq!(result.stats.total_skipped, 1);
        assert_eq!(result.errors["field"].len(), 1);
    }

    #[test]
    #[should_panic(expected = "validator exploded")]
    fn test_panicking_validator_propagates_when_not_caught() {
        let rule = Rule::field(vec![Validator::new(|_, _, _| panic!("validator exploded"))]);
        run(&rule, &json!(""), false);
    }

    #[test]
    fn test_post_validator_sees_partial_result() {
        let data = json!({});
        let logger = Logger::disabled();
        let ctx = EvaluationContext { data: &data, catch_panics: true, logger: &logger };

        let mut result = ValidationResult::empty();
        result.record_violation(Severity::Error, "user.name", "required".to_string());

        let rule = Rule::aggregate(|_, partial| Some(partial.errors.is_empty()))
            .with_message("aggregate failed");
        let post = rule.postvalidator.clone().unwrap();
        evaluate_post(&rule, &post, "user_info", &ctx, &mut result);

        assert_eq!(result.errors["user_info"], vec!["aggregate failed"]);
        assert_eq!(result.stats.processed_rules, 1);
    }

    #[test]
    fn test_post_validator_decline_and_fallback_message() {
        let data = json!({});
        let logger = Logger::disabled();
        let ctx = EvaluationContext { data: &data, catch_panics: true, logger: &logger };
        let mut result = ValidationResult::empty();

        let declines = Rule::aggregate(|_, _| None);
        evaluate_post(&declines, declines.postvalidator.as_ref().unwrap(), "a", &ctx, &mut result);
        assert_eq!(result.stats.total_skipped, 1);

        let fails = Rule::aggregate(|_, _| Some(false)).with_level(Severity::Warning);
        evaluate_post(&fails, fails.postvalidator.as_ref().unwrap(), "b", &ctx, &mut result);
        assert_eq!(result.warnings["b"], vec!["Empty message, \"b\""]);
    }
}
