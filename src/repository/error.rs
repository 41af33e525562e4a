use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by assignment repositories.
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored document could not be decoded.
    #[error("corrupt document at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("storage path unavailable: {path}")]
    StorageUnavailable { path: PathBuf },

    /// Write rejected by the backend.
    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("repository task failed: {reason}")]
    Task { reason: String },
}

/// Convenience result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
