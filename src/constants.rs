//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Score Invariants
//!
//! Every similarity and plagiarism score is a value in `[0, 1]`. Thresholds are compared
//! with `>=` and must lie in `(0, 1]`: a zero threshold would turn every exempted sentence
//! (scored `0.0`) into a match. Use [`validate_threshold`] at module boundaries.

/// Author sentinel used when no person name survives inference.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Title used when the document carries no usable metadata.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Minimum per-sentence similarity for a sentence pair to count as plagiarized.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.95;

/// Minimum whole-document similarity before any sentence-level work is done.
pub const DEFAULT_DOCUMENT_THRESHOLD: f32 = 0.991;

/// Score reported for an exact whole-document match.
pub const EXACT_MATCH_SCORE: f32 = 1.0;

/// Word count below which a sentence is considered too generic to compare.
pub const MIN_SENTENCE_WORDS: usize = 3;

/// Average word length used to turn [`MIN_SENTENCE_WORDS`] into characters.
pub const AVERAGE_WORD_CHARS: usize = 7;

/// Sentences shorter than this many characters are exempt from comparison.
pub const MIN_SENTENCE_CHARS: usize = MIN_SENTENCE_WORDS * AVERAGE_WORD_CHARS;

/// Max tokens fed to any transformer model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Max sentence embeddings kept in memory by the similarity backend.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 50_000;

/// Error returned when a score threshold is outside `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdError {
    /// Threshold is not a finite number.
    NotFinite,
    /// Threshold is outside `(0, 1]`.
    OutOfRange { value: f32 },
}

impl std::fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite => write!(f, "threshold must be a finite number"),
            Self::OutOfRange { value } => {
                write!(f, "threshold must be in (0.0, 1.0], got {}", value)
            }
        }
    }
}

impl std::error::Error for ThresholdError {}

/// Validates that `value` is a usable score threshold.
///
/// # Example
///
/// ```
/// use verifier::constants::{validate_threshold, DEFAULT_SIMILARITY_THRESHOLD};
///
/// validate_threshold(DEFAULT_SIMILARITY_THRESHOLD).unwrap();
/// assert!(validate_threshold(0.0).is_err());
/// ```
pub fn validate_threshold(value: f32) -> Result<(), ThresholdError> {
    if !value.is_finite() {
        return Err(ThresholdError::NotFinite);
    }
    if value <= 0.0 || value > 1.0 {
        return Err(ThresholdError::OutOfRange { value });
    }
    Ok(())
}
