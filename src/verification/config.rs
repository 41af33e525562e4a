use crate::constants::{
    DEFAULT_DOCUMENT_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD, MIN_SENTENCE_CHARS,
    validate_threshold,
};

/// Thresholds of the two-tier comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonConfig {
    /// Minimum per-sentence similarity for a hit.
    pub similarity_threshold: f32,
    /// Minimum whole-document similarity before sentences are compared.
    pub document_threshold: f32,
    /// Sentences shorter than this (in characters) score `0.0` without being compared.
    pub min_sentence_chars: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            document_threshold: DEFAULT_DOCUMENT_THRESHOLD,
            min_sentence_chars: MIN_SENTENCE_CHARS,
        }
    }
}

impl ComparisonConfig {
    pub fn new(similarity_threshold: f32, document_threshold: f32) -> Self {
        Self {
            similarity_threshold,
            document_threshold,
            ..Self::default()
        }
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_document_threshold(mut self, threshold: f32) -> Self {
        self.document_threshold = threshold;
        self
    }

    pub fn with_min_sentence_chars(mut self, chars: usize) -> Self {
        self.min_sentence_chars = chars;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_threshold(self.similarity_threshold)
            .map_err(|e| format!("similarity_threshold: {}", e))?;
        validate_threshold(self.document_threshold)
            .map_err(|e| format!("document_threshold: {}", e))?;
        Ok(())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifierConfig {
    pub comparison: ComparisonConfig,
    /// Max concurrent comparison tasks.
    pub workers: usize,
    /// When `false`, submissions are stored without being compared.
    pub detection_enabled: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            comparison: ComparisonConfig::default(),
            workers: default_workers(),
            detection_enabled: true,
        }
    }
}

impl VerifierConfig {
    pub fn with_comparison(mut self, comparison: ComparisonConfig) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_detection(mut self, enabled: bool) -> Self {
        self.detection_enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.comparison.validate()?;
        if self.workers == 0 {
            return Err("workers must be at least 1".to_string());
        }
        Ok(())
    }
}

/// One worker per available core.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
