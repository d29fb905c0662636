//! Validation failure shared by every value-object factory

use thiserror::Error;

/// A value object factory rejected its input
///
/// This is the `ValidationError` kind surfaced to callers when a command
/// carries a malformed title, id, priority or status literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {value_object}: {reason}")]
pub struct InvalidValueObject {
    /// Which value object refused the input (e.g. "task title")
    pub value_object: &'static str,
    /// Human-readable reason
    pub reason: String,
}

impl InvalidValueObject {
    pub fn new(value_object: &'static str, reason: impl Into<String>) -> Self {
        Self {
            value_object,
            reason: reason.into(),
        }
    }
}
