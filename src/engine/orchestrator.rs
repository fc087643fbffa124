//! Validation orchestrator
//!
//! Evaluation runs in two phases over a fresh result:
//!
//! 1. Every field rule is resolved against the data and evaluated per
//!    located value. Aggregate rules are deferred; invalid rules are
//!    skipped without path resolution.
//! 2. If any aggregate rules exist, each runs once with read access to
//!    the phase-1 result.
//!
//! Totals and `level` are recomputed after each phase. The engine never
//! mutates its inputs and holds no state between calls.

use chrono::Utc;
use serde_json::Value;

use super::config::EngineConfig;
use super::errors::InputError;
use crate::observability::{Event, LogCapture, Logger, Timer, ValidationScope};
use crate::path::{self, PathVisitor};
use crate::result::{ResultState, ValidationResult};
use crate::rules::{
    evaluate_field, evaluate_post, record_skip, EvaluationContext, PostValidatorFn, Rule,
    RuleKind, Severity, ValidationModel, Validator, SKIP_INVALID_RULE,
};

/// Entry point for validating data against a model.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: EngineConfig,
    logger: Logger,
}

impl ValidationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let logger = Logger::new(config.logging.clone());
        Self { config, logger }
    }

    /// Routes log lines into `capture` instead of stdout/stderr. The
    /// logging config still decides whether and what is logged.
    pub fn with_log_capture(mut self, capture: LogCapture) -> Self {
        self.logger = self.logger.capturing(capture);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates `data` against `model`.
    ///
    /// Missing or empty inputs never panic: they produce a result with
    /// `state = internal error` and the reason in `error`.
    pub fn validate(
        &self,
        data: Option<&Value>,
        model: Option<&ValidationModel>,
    ) -> ValidationResult {
        let (data, model) = match InputError::check(data, model) {
            Ok(inputs) => inputs,
            Err(err) => {
                let reason = err.to_string();
                self.logger.log(Event::ValidationRejected, &[("reason", reason.as_str())]);
                return ValidationResult::rejected(reason);
            }
        };

        let timer = Timer::new();
        let rule_count = model.len().to_string();
        let scope = ValidationScope::begin(&self.logger, &[("rules", rule_count.as_str())]);

        let mut result = ValidationResult::empty();
        result.stats.started_at = Utc::now();
        result.stats.finished_at = result.stats.started_at;
        result.level = Severity::None;

        self.run_phases(data, model, &mut result);

        result.stats.finished_at = Utc::now();
        result.stats.time = timer.elapsed_ms();
        result.state = ResultState::Completed;

        let total_errors = result.stats.total_errors.to_string();
        let total_skipped = result.stats.total_skipped.to_string();
        scope.complete(&[
            ("level", result.level.as_str()),
            ("total_errors", total_errors.as_str()),
            ("total_skipped", total_skipped.as_str()),
        ]);

        result
    }

    /// `validate` for callers that always have both inputs.
    pub fn validate_document(&self, data: &Value, model: &ValidationModel) -> ValidationResult {
        self.validate(Some(data), Some(model))
    }

    fn run_phases(&self, data: &Value, model: &ValidationModel, result: &mut ValidationResult) {
        let ctx = EvaluationContext {
            data,
            catch_panics: self.config.catch_validator_panics,
            logger: &self.logger,
        };

        let mut deferred: Vec<(&str, &Rule, &PostValidatorFn)> = Vec::new();

        for (path, rule) in model {
            match rule.kind() {
                RuleKind::Aggregate(post) => deferred.push((path.as_str(), rule, post)),
                RuleKind::Invalid => record_skip(result, path, SKIP_INVALID_RULE, &self.logger),
                RuleKind::Field(validators) => {
                    let mut visitor = FieldRuleVisitor {
                        rule,
                        validators,
                        ctx: &ctx,
                        result: &mut *result,
                    };
                    path::resolve(data, path, &mut visitor);
                }
            }
        }

        result.recompute_totals();

        if deferred.is_empty() {
            return;
        }

        let aggregate_count = deferred.len().to_string();
        self.logger
            .log(Event::PostValidationBegin, &[("rules", aggregate_count.as_str())]);

        for (path, rule, post) in deferred {
            evaluate_post(rule, post, path, &ctx, result);
        }

        result.recompute_totals();
    }
}

/// Feeds located values of one field rule into the evaluator.
struct FieldRuleVisitor<'r, 'c> {
    rule: &'r Rule,
    validators: &'r [Validator],
    ctx: &'r EvaluationContext<'c>,
    result: &'r mut ValidationResult,
}

impl<'v> PathVisitor<'v> for FieldRuleVisitor<'_, '_> {
    fn on_value(&mut self, value: &'v Value, path: &str) {
        evaluate_field(self.rule, self.validators, path, value, self.ctx, self.result);
    }

    fn on_unresolved(&mut self, path: &str, segment: &str) {
        record_skip(self.result, path, segment, self.ctx.logger);
    }
}

/// Validates with a default engine (panics caught, logging off).
pub fn validate(data: &Value, model: &ValidationModel) -> ValidationResult {
    ValidationEngine::default().validate_document(data, model)
}
