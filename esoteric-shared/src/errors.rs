//! Validation errors for incoming payloads.

use thiserror::Error;

/// A payload failed validation before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The human readable reason, without the prefix.
    pub fn reason(&self) -> &str {
        &self.0
    }
}
