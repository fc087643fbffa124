//! Observability subsystem
//!
//! Structured JSON log lines for the evaluation lifecycle.
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a result
//! 2. Synchronous, no background threads
//! 3. Disabled by default; enabled per engine through `EngineConfig`
//!
//! # Usage
//!
//! ```ignore
//! use fieldcheck::observability::{Event, Logger, LoggingConfig};
//!
//! let logger = Logger::new(LoggingConfig::enabled());
//! logger.log(Event::ValidationBegin, &[("rules", "3")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{format_line, LogCapture, LogLevel, LogTarget, Logger, LoggingConfig};
pub use scope::{Timer, ValidationScope};
