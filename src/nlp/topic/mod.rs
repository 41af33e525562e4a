//! Topic classification.
//!
//! The classifier is optional: when no model is configured (or it fails to load) the
//! reader leaves every assignment's topic as [`Topic::Undefined`].

pub mod config;

#[cfg(test)]
mod tests;

pub use config::TopicConfig;

use std::sync::Arc;

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::{BertClassifier, ModelInput, read_labels};
use super::device::select_device;
use super::error::{NlpError, NlpResult};
use super::utils::{check_model_dir, load_tokenizer_with_truncation};
use super::TopicPredictor;
use crate::domain::Topic;

/// Maps classifier labels to topics; unknown labels become [`Topic::Undefined`].
pub fn topics_from_labels<S: AsRef<str>>(labels: &[S]) -> Vec<Topic> {
    labels
        .iter()
        .map(|label| Topic::from_label(label.as_ref()).unwrap_or_default())
        .collect()
}

/// BERT sequence classifier over the [`Topic`] labels.
pub struct TopicClassifier {
    classifier: BertClassifier,
    tokenizer: Arc<Tokenizer>,
    device: Device,
    topics: Vec<Topic>,
}

impl std::fmt::Debug for TopicClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("topics", &self.topics)
            .finish()
    }
}

impl TopicClassifier {
    pub fn load(config: &TopicConfig) -> NlpResult<Self> {
        let Some(model_path) = config.model_path.clone() else {
            return Err(NlpError::Unavailable {
                reason: "no topic model configured".to_string(),
            });
        };

        if !model_path.exists() {
            return Err(NlpError::ModelNotFound { path: model_path });
        }
        check_model_dir(&model_path).map_err(|reason| NlpError::ModelLoadFailed { reason })?;

        let labels = read_labels(&model_path).map_err(|e| NlpError::ModelLoadFailed {
            reason: format!("Failed to read topic labels: {}", e),
        })?;
        let topics = topics_from_labels(&labels);
        if topics.is_empty() {
            return Err(NlpError::InvalidConfig {
                reason: "topic model declares no labels".to_string(),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for topic classifier");

        let classifier = BertClassifier::load(&model_path, topics.len(), &device).map_err(|e| {
            NlpError::ModelLoadFailed {
                reason: format!("Failed to load topic classifier: {}", e),
            }
        })?;

        let tokenizer =
            load_tokenizer_with_truncation(&model_path, config.effective_max_seq_len()).map_err(
                |e| NlpError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                },
            )?;

        info!(
            model_path = %model_path.display(),
            num_topics = topics.len(),
            "Topic classifier loaded successfully"
        );

        Ok(Self {
            classifier,
            tokenizer: Arc::new(tokenizer),
            device,
            topics,
        })
    }

    /// Loads the classifier, or returns `None` if it is not configured or fails to load.
    pub fn load_optional(config: &TopicConfig) -> Option<Self> {
        config.model_path.as_ref()?;

        match Self::load(config) {
            Ok(classifier) => Some(classifier),
            Err(e) => {
                warn!(error = %e, "Topic classifier unavailable, topics will be Undefined");
                None
            }
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}

impl TopicPredictor for TopicClassifier {
    fn predict(&self, text: &str) -> NlpResult<Topic> {
        if text.trim().is_empty() {
            return Ok(Topic::Undefined);
        }

        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| NlpError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input = ModelInput::from_encoding(&encoding, &self.device)?;
        let logits = self
            .classifier
            .forward(&input.input_ids, &input.type_ids, Some(&input.attention_mask))
            .map_err(|e| NlpError::InferenceFailed {
                reason: format!("Topic classifier forward pass failed: {}", e),
            })?;

        let best = logits.squeeze(0)?.argmax(0)?.to_scalar::<u32>()? as usize;
        let topic = self.topics.get(best).copied().unwrap_or_default();

        debug!(index = best, topic = %topic, "Predicted topic");
        Ok(topic)
    }
}
