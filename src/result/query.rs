//! Read-only queries over a finished `ValidationResult`
//!
//! Paths are matched either by text (exact key or substring) or by a
//! regular expression over the concrete path keys.

use regex::Regex;

use super::types::{ValidationResult, Violations};
use crate::rules::Severity;

/// How to select concrete paths.
#[derive(Debug, Clone, Copy)]
pub enum PathQuery<'a> {
    Text(&'a str),
    Pattern(&'a Regex),
}

impl<'a> From<&'a str> for PathQuery<'a> {
    fn from(text: &'a str) -> Self {
        PathQuery::Text(text)
    }
}

impl<'a> From<&'a String> for PathQuery<'a> {
    fn from(text: &'a String) -> Self {
        PathQuery::Text(text)
    }
}

impl<'a> From<&'a Regex> for PathQuery<'a> {
    fn from(pattern: &'a Regex) -> Self {
        PathQuery::Pattern(pattern)
    }
}

/// `exact` only applies to text queries.
fn count_like(query: PathQuery<'_>, target: &Violations, exact: bool) -> usize {
    match query {
        PathQuery::Text("") => 0,
        PathQuery::Text(key) if exact => target.get(key).map_or(0, Vec::len),
        PathQuery::Text(key) => target
            .iter()
            .filter(|(path, _)| path.contains(key))
            .map(|(_, messages)| messages.len())
            .sum(),
        PathQuery::Pattern(re) => target
            .iter()
            .filter(|(path, _)| re.is_match(path))
            .map(|(_, messages)| messages.len())
            .sum(),
    }
}

/// Text queries test for the exact key; patterns for any matching key.
fn has_like(query: PathQuery<'_>, target: &Violations) -> bool {
    match query {
        PathQuery::Text("") => false,
        PathQuery::Text(key) => target.contains_key(key),
        PathQuery::Pattern(re) => target.keys().any(|path| re.is_match(path)),
    }
}

pub fn count_errors_like<'a>(
    query: impl Into<PathQuery<'a>>,
    result: &ValidationResult,
    exact: bool,
) -> usize {
    count_like(query.into(), &result.errors, exact)
}

pub fn count_warnings_like<'a>(
    query: impl Into<PathQuery<'a>>,
    result: &ValidationResult,
    exact: bool,
) -> usize {
    count_like(query.into(), &result.warnings, exact)
}

pub fn count_notices_like<'a>(
    query: impl Into<PathQuery<'a>>,
    result: &ValidationResult,
    exact: bool,
) -> usize {
    count_like(query.into(), &result.notices, exact)
}

pub fn has_errors(result: &ValidationResult) -> bool {
    result.stats.total_errors > 0
}

pub fn has_warnings(result: &ValidationResult) -> bool {
    result.stats.total_warnings > 0
}

pub fn has_notices(result: &ValidationResult) -> bool {
    result.stats.total_notices > 0
}

pub fn has_error<'a>(query: impl Into<PathQuery<'a>>, result: &ValidationResult) -> bool {
    has_like(query.into(), &result.errors)
}

pub fn has_warning<'a>(query: impl Into<PathQuery<'a>>, result: &ValidationResult) -> bool {
    has_like(query.into(), &result.warnings)
}

pub fn has_notice<'a>(query: impl Into<PathQuery<'a>>, result: &ValidationResult) -> bool {
    has_like(query.into(), &result.notices)
}

/// Worst severity recorded at `field`, or the overall level when no
/// field is given.
pub fn validation_class(result: &ValidationResult, field: Option<&str>, exact: bool) -> Severity {
    let Some(field) = field.filter(|f| !f.is_empty()) else {
        return result.level;
    };

    Severity::TIERS
        .into_iter()
        .find(|tier| {
            result
                .violations(*tier)
                .map_or(false, |target| count_like(PathQuery::Text(field), target, exact) > 0)
        })
        .unwrap_or(Severity::None)
}
