//! Validation model types
//!
//! A model maps field paths to rules. A rule is either a field rule (a
//! list of validators applied to every value its path resolves to) or an
//! aggregate rule (one postvalidator run after all field rules, with read
//! access to the partial result).

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::ValidationResult;
use crate::validators;

/// Validator verdict: `Some(true)` pass, `Some(false)` violation,
/// `None` the validator declines to judge.
pub type ValidatorOutcome = Option<bool>;

/// Validator parameters, a JSON object.
pub type Params = serde_json::Map<String, Value>;

/// `(value, params, data)`
pub type ValidatorFn =
    Arc<dyn Fn(&Value, Option<&Params>, &Value) -> ValidatorOutcome + Send + Sync>;

/// `(data, partial result)`
pub type PostValidatorFn = Arc<dyn Fn(&Value, &ValidationResult) -> ValidatorOutcome + Send + Sync>;

/// Violation severity, ordered `Unknown < None < Notice < Warning < Error`.
///
/// `Unknown` only appears before evaluation starts (or when the inputs
/// were rejected). Only `Notice`, `Warning` and `Error` are violation
/// tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Unknown,
    None,
    Notice,
    Warning,
    Error,
}

impl Severity {
    /// Violation tiers, most severe first
    pub const TIERS: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Notice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::None => "none",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Whether violations of this severity are recorded.
    pub fn is_violation(&self) -> bool {
        matches!(self, Severity::Notice | Severity::Warning | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A setting given either literally or computed from `(data, value)`.
pub enum Dynamic<T> {
    Literal(T),
    Computed(Arc<dyn Fn(&Value, &Value) -> T + Send + Sync>),
}

impl<T: Clone> Dynamic<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> T + Send + Sync + 'static,
    {
        Dynamic::Computed(Arc::new(f))
    }

    /// Evaluates the setting for one located value.
    pub fn resolve(&self, data: &Value, value: &Value) -> T {
        match self {
            Dynamic::Literal(v) => v.clone(),
            Dynamic::Computed(f) => f(data, value),
        }
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Literal(v) => Dynamic::Literal(v.clone()),
            Dynamic::Computed(f) => Dynamic::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// Whether a rule applies; `false` records the instance as skipped.
pub type Activation = Dynamic<bool>;

/// Violation message. A computed message that returns an empty string
/// counts as absent.
pub type Message = Dynamic<String>;

impl From<bool> for Activation {
    fn from(active: bool) -> Self {
        Dynamic::Literal(active)
    }
}

impl From<&str> for Message {
    fn from(message: &str) -> Self {
        Dynamic::Literal(message.to_string())
    }
}

impl From<String> for Message {
    fn from(message: String) -> Self {
        Dynamic::Literal(message)
    }
}

/// One check inside a field rule.
#[derive(Clone, Default)]
pub struct Validator {
    /// `None` marks an unusable validator; it is skipped, not run
    pub validate: Option<ValidatorFn>,
    pub level: Option<Severity>,
    pub message: Option<Message>,
    pub params: Option<Params>,
}

impl Validator {
    pub fn new<F>(validate: F) -> Self
    where
        F: Fn(&Value, Option<&Params>, &Value) -> ValidatorOutcome + Send + Sync + 'static,
    {
        Self {
            validate: Some(Arc::new(validate)),
            ..Self::default()
        }
    }

    /// Looks up a builtin validator by name. An unknown name yields a
    /// validator without a callable.
    pub fn builtin(name: &str) -> Self {
        Self {
            validate: validators::builtin(name).map(|f| Arc::new(f) as ValidatorFn),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_message_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> String + Send + Sync + 'static,
    {
        self.message = Some(Message::computed(f));
        self
    }

    /// Sets the params. Anything other than a JSON object clears them.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = match params {
            Value::Object(map) => Some(map),
            _ => None,
        };
        self
    }

    pub fn is_callable(&self) -> bool {
        self.validate.is_some()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("callable", &self.is_callable())
            .field("level", &self.level)
            .field("message", &self.message)
            .field("params", &self.params)
            .finish()
    }
}

/// A model entry.
#[derive(Clone, Default)]
pub struct Rule {
    /// Overrides every validator's level
    pub level: Option<Severity>,
    pub message: Option<Message>,
    /// Absent means active
    pub active: Option<Activation>,
    pub validators: Vec<Validator>,
    pub postvalidator: Option<PostValidatorFn>,
}

/// What a rule is, decided once from which members are populated.
#[derive(Clone, Copy)]
pub enum RuleKind<'a> {
    Field(&'a [Validator]),
    Aggregate(&'a PostValidatorFn),
    /// Neither validators nor a postvalidator
    Invalid,
}

impl Rule {
    pub fn field(validators: Vec<Validator>) -> Self {
        Self {
            validators,
            ..Self::default()
        }
    }

    pub fn aggregate<F>(postvalidator: F) -> Self
    where
        F: Fn(&Value, &ValidationResult) -> ValidatorOutcome + Send + Sync + 'static,
    {
        Self {
            postvalidator: Some(Arc::new(postvalidator)),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_message_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> String + Send + Sync + 'static,
    {
        self.message = Some(Message::computed(f));
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(Activation::from(active));
        self
    }

    pub fn with_active_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.active = Some(Activation::computed(f));
        self
    }

    /// A postvalidator wins over validators when both are set.
    pub fn kind(&self) -> RuleKind<'_> {
        match &self.postvalidator {
            Some(post) => RuleKind::Aggregate(post),
            None if !self.validators.is_empty() => RuleKind::Field(&self.validators),
            None => RuleKind::Invalid,
        }
    }

    /// Whether the rule applies to `value`.
    pub fn is_active(&self, data: &Value, value: &Value) -> bool {
        self.active
            .as_ref()
            .map_or(true, |active| active.resolve(data, value))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("active", &self.active)
            .field("validators", &self.validators)
            .field("postvalidator", &self.postvalidator.is_some())
            .finish()
    }
}

/// Field path → rule. Iterates in path order; inserting an existing path
/// replaces its rule.
#[derive(Debug, Clone, Default)]
pub struct ValidationModel {
    rules: BTreeMap<String, Rule>,
}

impl ValidationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, returning the one it replaced.
    pub fn insert(&mut self, path: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(path.into(), rule)
    }

    pub fn with_rule(mut self, path: impl Into<String>, rule: Rule) -> Self {
        self.insert(path, rule);
        self
    }

    pub fn get(&self, path: &str) -> Option<&Rule> {
        self.rules.get(path)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Rule> {
        self.rules.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for ValidationModel {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        let mut model = Self::new();
        for (path, rule) in iter {
            model.insert(path, rule);
        }
        model
    }
}

impl<'a> IntoIterator for &'a ValidationModel {
    type Item = (&'a String, &'a Rule);
    type IntoIter = btree_map::Iter<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
