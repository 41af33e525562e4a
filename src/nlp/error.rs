use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the NLP capabilities (similarity, entities, topics).
#[derive(Debug, Error)]
pub enum NlpError {
    #[error("model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("capability unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<candle_core::Error> for NlpError {
    fn from(err: candle_core::Error) -> Self {
        NlpError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for NlpError {
    fn from(err: std::io::Error) -> Self {
        NlpError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}

/// Convenience result type for NLP operations.
pub type NlpResult<T> = Result<T, NlpError>;
