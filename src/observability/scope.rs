//! Begin/complete logging around one `validate()` call
//!
//! - Logs `VALIDATION_BEGIN` on creation
//! - Logs `VALIDATION_COMPLETE` when `complete()` is called
//! - Logs `VALIDATION_INCOMPLETE` on drop otherwise (a validator panic
//!   unwinding through the engine)

use std::time::Instant;

use super::events::Event;
use super::logger::Logger;

pub struct ValidationScope<'a> {
    logger: &'a Logger,
    completed: bool,
}

impl<'a> ValidationScope<'a> {
    pub fn begin(logger: &'a Logger, fields: &[(&str, &str)]) -> Self {
        logger.log(Event::ValidationBegin, fields);
        Self {
            logger,
            completed: false,
        }
    }

    pub fn complete(mut self, fields: &[(&str, &str)]) {
        self.completed = true;
        self.logger.log(Event::ValidationComplete, fields);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Drop for ValidationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.logger.log(
                Event::ValidationIncomplete,
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Monotonic elapsed-time measurement.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds with sub-millisecond precision.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
