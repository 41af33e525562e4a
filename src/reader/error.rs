use thiserror::Error;

use crate::nlp::NlpError;

/// Errors produced while reading a submitted file.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Declared media type is not one of the supported formats.
    #[error("unsupported media type: {media_type}")]
    UnsupportedFormat { media_type: String },

    /// The file is not a valid document of its declared format.
    #[error("failed to parse {format} document: {reason}")]
    Parse { format: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Author inference or topic prediction failed.
    #[error("NLP capability failed: {0}")]
    Nlp(#[from] NlpError),

    /// The blocking read task panicked or was cancelled.
    #[error("read task failed: {reason}")]
    Task { reason: String },
}

impl ReaderError {
    pub(crate) fn parse(format: &'static str, reason: impl std::fmt::Display) -> Self {
        ReaderError::Parse {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
