use thiserror::Error;

/// Errors raised by progression storage and session commands.
#[derive(Debug, Error)]
pub enum ProgressionError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON snapshot encoding errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown quest, skill, or active quest instance.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("skill already learned: {0}")]
    AlreadyLearned(String),

    /// The player does not meet the requirements.
    #[error("locked: {0}")]
    Locked(String),
}
