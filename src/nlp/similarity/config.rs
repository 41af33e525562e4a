use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_MAX_SEQ_LEN};

/// Sentence similarity configuration.
#[derive(Debug, Clone)]
pub struct SimilarityConfig {
    /// Directory holding a BERT sentence encoder (`config.json`, `model.safetensors`,
    /// `tokenizer.json`). `None` selects the lexical backend.
    pub model_path: Option<PathBuf>,
    pub max_seq_len: usize,
    /// Max cached sentence embeddings; `0` disables the cache.
    pub cache_capacity: u64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl SimilarityConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Self::default()
        }
    }

    /// Config for the lexical backend (no model files).
    pub fn lexical() -> Self {
        Self::default()
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than 0".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
