//! Observable engine events

use std::fmt;

use super::logger::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Inputs accepted, phase 1 starting
    ValidationBegin,
    /// Result stamped completed
    ValidationComplete,
    /// Inputs failed a guard check
    ValidationRejected,
    /// `validate()` unwound before completing
    ValidationIncomplete,
    /// Aggregate rules starting
    PostValidationBegin,
    /// A rule instance or validator was skipped
    RuleSkipped,
    /// A validator panicked and was recorded as a skip
    ValidatorPanicked,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::ValidationIncomplete => "VALIDATION_INCOMPLETE",
            Event::PostValidationBegin => "POSTVALIDATION_BEGIN",
            Event::RuleSkipped => "RULE_SKIPPED",
            Event::ValidatorPanicked => "VALIDATOR_PANICKED",
        }
    }

    /// Level the event is logged at by default.
    pub fn level(&self) -> LogLevel {
        match self {
            Event::RuleSkipped => LogLevel::Trace,
            Event::ValidationBegin | Event::ValidationComplete | Event::PostValidationBegin => {
                LogLevel::Info
            }
            Event::ValidationRejected | Event::ValidationIncomplete | Event::ValidatorPanicked => {
                LogLevel::Warn
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ValidationBegin.as_str(), "VALIDATION_BEGIN");
        assert_eq!(Event::RuleSkipped.to_string(), "RULE_SKIPPED");
    }

    #[test]
    fn test_event_levels() {
        assert_eq!(Event::RuleSkipped.level(), LogLevel::Trace);
        assert_eq!(Event::ValidationComplete.level(), LogLevel::Info);
        assert_eq!(Event::ValidatorPanicked.level(), LogLevel::Warn);
    }
}
