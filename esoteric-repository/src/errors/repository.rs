//! Errors raised by repository implementations.
use thiserror::Error;

/// Represents errors that can occur within the repository.
///
/// Storage failures are not classified further: callers log them and answer
/// with a generic failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored value: {0}")]
    DecodeError(String),
}

impl RepositoryError {
    /// Create a decode error for a column holding an unexpected value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}
