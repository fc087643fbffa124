//! Violation message resolution
//!
//! Precedence, most specific first: validator message, rule message,
//! generated fallback. An empty literal counts as absent; an empty
//! computed message falls through but is remembered, so the fallback
//! names the level that produced nothing.

use serde_json::Value;

use super::types::{Dynamic, Message};

#[derive(Debug, Clone, Copy)]
enum Source {
    Validator,
    Rule,
}

impl Source {
    fn as_str(&self) -> &'static str {
        match self {
            Source::Validator => "validator",
            Source::Rule => "rule",
        }
    }
}

/// Picks the message for a violation at `path`.
pub fn resolve_message(
    validator: Option<&Message>,
    rule: Option<&Message>,
    path: &str,
    data: &Value,
    value: &Value,
) -> String {
    let mut attempted = None;

    for (source, message) in [(Source::Validator, validator), (Source::Rule, rule)] {
        match message {
            None => {}
            Some(Dynamic::Literal(text)) if text.is_empty() => {}
            Some(Dynamic::Literal(text)) => return text.clone(),
            Some(computed) => {
                let text = computed.resolve(data, value);
                if !text.is_empty() {
                    return text;
                }
                attempted.get_or_insert(source);
            }
        }
    }

    match attempted {
        Some(source) => format!("Empty message ({}), \"{}\"", source.as_str(), path),
        None => format!("Empty message, \"{}\"", path),
    }
}
