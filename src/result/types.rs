//! Validation result model
//!
//! One `ValidationResult` is created per `validate()` call and mutated in
//! place through both evaluation phases.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::Severity;

/// Concrete path → messages, in the order they were recorded.
pub type Violations = BTreeMap<String, Vec<String>>;

/// Lifecycle of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultState {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "completed")]
    Completed,
    /// The inputs were rejected before evaluation
    #[serde(rename = "internal error")]
    InternalError,
}

impl ResultState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultState::Unknown => "unknown",
            ResultState::Completed => "completed",
            ResultState::InternalError => "internal error",
        }
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters and timing for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Elapsed milliseconds
    pub time: f64,
    /// Evaluated rule instances (active field-rule instances plus aggregate rules)
    pub processed_rules: u64,
    pub processed_validators: u64,
    pub total_errors: u64,
    pub total_warnings: u64,
    pub total_notices: u64,
    pub total_skipped: u64,
}

impl Default for Stats {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            time: 0.0,
            processed_rules: 0,
            processed_validators: 0,
            total_errors: 0,
            total_warnings: 0,
            total_notices: 0,
            total_skipped: 0,
        }
    }
}

/// Outcome of one `validate()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub state: ResultState,
    /// Worst severity recorded, `None` when clean, `Unknown` when rejected
    pub level: Severity,
    /// Why the inputs were rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stats: Stats,
    pub errors: Violations,
    pub warnings: Violations,
    pub notices: Violations,
    /// `"<path>, <reason>"` entries
    pub skipped: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValidationResult {
    /// A fresh result: state and level unknown, everything empty.
    pub fn empty() -> Self {
        Self {
            state: ResultState::Unknown,
            level: Severity::Unknown,
            error: None,
            stats: Stats::default(),
            errors: Violations::new(),
            warnings: Violations::new(),
            notices: Violations::new(),
            skipped: Vec::new(),
        }
    }

    /// A result for inputs that could not be evaluated.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            state: ResultState::InternalError,
            error: Some(reason.into()),
            ..Self::empty()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ResultState::Completed
    }

    /// The violation map for a tier; `None` for non-violation severities.
    pub fn violations(&self, severity: Severity) -> Option<&Violations> {
        match severity {
            Severity::Error => Some(&self.errors),
            Severity::Warning => Some(&self.warnings),
            Severity::Notice => Some(&self.notices),
            Severity::None | Severity::Unknown => None,
        }
    }

    fn violations_mut(&mut self, severity: Severity) -> Option<&mut Violations> {
        match severity {
            Severity::Error => Some(&mut self.errors),
            Severity::Warning => Some(&mut self.warnings),
            Severity::Notice => Some(&mut self.notices),
            Severity::None | Severity::Unknown => None,
        }
    }

    /// Appends a message under `path`. Returns `false` (and records
    /// nothing) for non-violation severities.
    pub fn record_violation(&mut self, severity: Severity, path: &str, message: String) -> bool {
        let Some(violations) = self.violations_mut(severity) else {
            return false;
        };
        violations.entry(path.to_string()).or_default().push(message);
        true
    }

    pub fn record_skip(&mut self, path: &str, chunk: &str) {
        self.stats.total_skipped += 1;
        self.skipped.push(format!("{}, {}", path, chunk));
    }

    /// Recounts the per-tier totals and sets `level` to the worst
    /// non-empty tier, or `None`.
    pub fn recompute_totals(&mut self) {
        self.stats.total_errors = count(&self.errors);
        self.stats.total_warnings = count(&self.warnings);
        self.stats.total_notices = count(&self.notices);

        self.level = if self.stats.total_errors > 0 {
            Severity::Error
        } else if self.stats.total_warnings > 0 {
            Severity::Warning
        } else if self.stats.total_notices > 0 {
            Severity::Notice
        } else {
            Severity::None
        };
    }
}

fn count(violations: &Violations) -> u64 {
    violations.values().map(|messages| messages.len() as u64).sum()
}
