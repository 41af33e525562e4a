use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Topic classifier configuration.
#[derive(Debug, Clone, Default)]
pub struct TopicConfig {
    /// Directory holding a fine-tuned BERT sequence classifier. `None` disables topic
    /// prediction.
    pub model_path: Option<PathBuf>,
    /// Max tokens; `0` means [`DEFAULT_MAX_SEQ_LEN`].
    pub max_seq_len: usize,
}

impl TopicConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn effective_max_seq_len(&self) -> usize {
        if self.max_seq_len == 0 {
            DEFAULT_MAX_SEQ_LEN
        } else {
            self.max_seq_len
        }
    }
}
