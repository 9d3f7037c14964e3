//! Error types for practice-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validation failures for user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("word cannot be empty")]
    EmptyWord,

    #[error("dictionary name cannot be empty")]
    EmptyName,

    #[error("reps per word must be at least 1, got {0}")]
    InvalidReps(i64),

    #[error("time must be non-negative, got {0} ms")]
    NegativeTime(i64),
}
