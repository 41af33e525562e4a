use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Named entity recognition configuration.
#[derive(Debug, Clone)]
pub struct EntitiesConfig {
    /// Directory holding a BERT token classifier with an `id2label` table in
    /// `config.json`. `None` selects the capitalization heuristic.
    pub model_path: Option<PathBuf>,
    pub max_seq_len: usize,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl EntitiesConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Self::default()
        }
    }

    pub fn heuristic() -> Self {
        Self::default()
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
