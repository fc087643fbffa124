//! Structured JSON logger
//!
//! - One line per event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - Off unless the engine config enables it

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::Event;

/// Log severity, ordered `Trace < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Per-rule detail (skips)
    Trace,
    /// Evaluation lifecycle
    Info,
    /// Rejected inputs, caught panics
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Events below this level are dropped
    pub min_level: LogLevel,
    pub target: LogTarget,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_level: LogLevel::Info,
            target: LogTarget::Stderr,
        }
    }
}

impl LoggingConfig {
    /// Logging on, INFO and above, to stderr.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// In-memory log sink. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, newline stripped.
    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Captured lines parsed as JSON objects.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// `event` of every captured line, in order.
    pub fn events(&self) -> Vec<String> {
        self.records()
            .iter()
            .filter_map(|record| record["event"].as_str().map(str::to_string))
            .collect()
    }

    fn write(&self, line: &str) {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.extend_from_slice(line.as_bytes());
    }
}

#[derive(Debug, Clone, Default)]
pub struct Logger {
    config: LoggingConfig,
    /// Replaces the configured target when set
    capture: Option<LogCapture>,
}

impl Logger {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            capture: None,
        }
    }

    /// Sends lines to `capture` instead of the configured target.
    pub fn capturing(mut self, capture: LogCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// A logger that never writes.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.config.enabled && level >= self.config.min_level
    }

    /// Logs `event` at its default level.
    pub fn log(&self, event: Event, fields: &[(&str, &str)]) {
        self.log_at(event.level(), event, fields);
    }

    pub fn log_at(&self, level: LogLevel, event: Event, fields: &[(&str, &str)]) {
        if !self.is_enabled_for(level) {
            return;
        }

        let line = format_line(level, event.as_str(), fields);
        if let Some(capture) = &self.capture {
            capture.write(&line);
            return;
        }
        match self.config.target {
            LogTarget::Stdout => write_line(&mut io::stdout().lock(), &line),
            LogTarget::Stderr => write_line(&mut io::stderr().lock(), &line),
        }
    }
}

/// Renders one log line, newline included.
pub fn format_line(level: LogLevel, event: &str, fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let mut line = String::with_capacity(128);
    line.push_str("{\"event\":");
    line.push_str(&quote(event));
    line.push_str(",\"severity\":");
    line.push_str(&quote(level.as_str()));

    for (key, value) in sorted {
        line.push(',');
        line.push_str(&quote(key));
        line.push(':');
        line.push_str(&quote(value));
    }

    line.push_str("}\n");
    line
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn write_line<W: Write>(writer: &mut W, line: &str) {
    // Logging must never fail the evaluation
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_line_is_json() {
        let line = format_line(LogLevel::Info, "VALIDATION_BEGIN", &[("rules", "3")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "VALIDATION_BEGIN");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["rules"], "3");
    }

    #[test]
    fn test_fields_sorted_and_event_first() {
        let a = format_line(LogLevel::Warn, "E", &[("zeta", "1"), ("alpha", "2")]);
        let b = format_line(LogLevel::Warn, "E", &[("alpha", "2"), ("zeta", "1")]);
        assert_eq!(a, b);
        assert!(a.find("\"event\"").unwrap() < a.find("\"severity\"").unwrap());
        assert!(a.find("alpha").unwrap() < a.find("zeta").unwrap());
    }

    #[test]
    fn test_escaping_and_single_line() {
        let line = format_line(LogLevel::Trace, "E", &[("path", "a \"b\"\nc")]);
        assert_eq!(line.matches('\n').count(), 1);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["path"], "a \"b\"\nc");
    }

    #[test]
    fn test_threshold() {
        let logger = Logger::disabled();
        assert!(!logger.is_enabled_for(LogLevel::Error));

        let logger = Logger::new(LoggingConfig {
            min_level: LogLevel::Warn,
            ..LoggingConfig::enabled()
        });
        assert!(!logger.is_enabled_for(LogLevel::Info));
        assert!(logger.is_enabled_for(LogLevel::Warn));
        assert!(logger.is_enabled_for(LogLevel::Error));
    }

    #[test]
    fn test_capture_receives_lines() {
        let capture = LogCapture::new();
        let logger = Logger::new(LoggingConfig::enabled()).capturing(capture.clone());

        logger.log(Event::ValidationBegin, &[("rules", "2")]);
        logger.log(Event::RuleSkipped, &[("path", "a"), ("reason", "[inactive]")]);
        logger.log(Event::ValidatorPanicked, &[("path", "b"), ("panic", "boom")]);

        // RULE_SKIPPED is TRACE, below the default INFO threshold
        assert_eq!(capture.events(), vec!["VALIDATION_BEGIN", "VALIDATOR_PANICKED"]);
        let records = capture.records();
        assert_eq!(records[0]["rules"], "2");
        assert_eq!(records[1]["severity"], "WARN");
        assert_eq!(records[1]["panic"], "boom");
    }

    #[test]
    fn test_capture_ignored_when_disabled() {
        let capture = LogCapture::new();
        let logger = Logger::disabled().capturing(capture.clone());
        logger.log(Event::ValidatorPanicked, &[]);
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{ "enabled": true, "min_level": "TRACE" }"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.min_level, LogLevel::Trace);
        assert_eq!(config.target, LogTarget::Stderr);
    }
}
