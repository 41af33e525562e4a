use thiserror::Error;

use crate::nlp::NlpError;
use crate::reader::ReaderError;
use crate::repository::RepositoryError;

/// Failure of one corpus-document comparison.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("similarity capability failed: {0}")]
    Similarity(#[from] NlpError),
}

/// Errors returned by the verification engine.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("failed to read submission: {0}")]
    Reader(#[from] ReaderError),

    /// Fetching the corpus or persisting the submission failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid verifier configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Convenience result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
