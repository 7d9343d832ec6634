//! Structured logging.

mod format;

pub use format::StructuredLogger;
