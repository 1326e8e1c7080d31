//! Error types for habits.

use thiserror::Error;

/// Errors surfaced by habits commands and stores.
#[derive(Debug, Error)]
pub enum HabitsError {
    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be read, written or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested user, habit or completion does not exist (or is not yours).
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule was violated (username, email, one completion per day).
    #[error("{0}")]
    Conflict(String),

    /// User input was rejected before reaching storage.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No current user could be resolved.
    #[error("No active user. Run `habits user register <name> --email <email>` or pass --user")]
    NoIdentity,

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HabitsError {
    /// Map a `rusqlite` error, turning unique-constraint violations into
    /// [`HabitsError::Conflict`] with `conflict` as the message.
    pub fn from_sqlite(err: &rusqlite::Error, context: &str, conflict: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = err {
            if code.code == rusqlite::ErrorCode::ConstraintViolation
                && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            {
                return Self::Conflict(conflict.to_string());
            }
        }
        Self::Database(format!("{context}: {err}"))
    }
}
