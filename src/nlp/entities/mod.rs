//! Named entity recognition.
//!
//! [`EntityRecognizer`] runs a BERT token classifier and decodes its BIO tags into
//! entity spans. Without a model it finds person-like names with a capitalization
//! heuristic ([`heuristic`]).

pub mod config;
pub mod heuristic;


pub use config::EntitiesConfig;

use std::sync::Arc;

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::{BertTokenClassifier, ModelInput, read_labels};
use super::device::select_device;
use super::error::{NlpError, NlpResult};
use super::utils::{check_model_dir, load_tokenizer_with_truncation};
use super::{Entity, EntityExtractor, EntityLabel};

enum RecognizerBackend {
    Model {
        classifier: BertTokenClassifier,
        tokenizer: Arc<Tokenizer>,
        device: Device,
        labels: Vec<String>,
    },
    Heuristic,
}

/// Named entity recognizer (supports a heuristic fallback).
pub struct EntityRecognizer {
    backend: RecognizerBackend,
    config: EntitiesConfig,
}

impl std::fmt::Debug for EntityRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRecognizer")
            .field(
                "backend",
                &match &self.backend {
                    RecognizerBackend::Model { device, labels, .. } => {
                        format!("Model({:?}, {} labels)", device, labels.len())
                    }
                    RecognizerBackend::Heuristic => "Heuristic".to_string(),
                },
            )
            .finish()
    }
}

impl EntityRecognizer {
    /// Loads the token classifier named by `config`, or the heuristic if none is configured.
    pub fn load(config: EntitiesConfig) -> NlpResult<Self> {
        config
            .validate()
            .map_err(|reason| NlpError::InvalidConfig { reason })?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("No NER model configured, using capitalization heuristic");
            return Ok(Self::heuristic());
        };

        if !model_path.exists() {
            return Err(NlpError::ModelNotFound { path: model_path });
        }
        check_model_dir(&model_path).map_err(|reason| NlpError::ModelLoadFailed { reason })?;

        let labels = read_labels(&model_path).map_err(|e| NlpError::ModelLoadFailed {
            reason: format!("Failed to read NER labels: {}", e),
        })?;
        if labels.is_empty() {
            return Err(NlpError::InvalidConfig {
                reason: "NER model declares no labels".to_string(),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for NER");

        info!(
            model_path = %model_path.display(),
            num_labels = labels.len(),
            "Loading NER model"
        );

        let classifier = BertTokenClassifier::load(&model_path, labels.len(), &device).map_err(
            |e| NlpError::ModelLoadFailed {
                reason: format!("Failed to load token classifier: {}", e),
            },
        )?;

        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_seq_len)
            .map_err(|e| NlpError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!("NER model loaded successfully");

        Ok(Self {
            backend: RecognizerBackend::Model {
                classifier,
                tokenizer: Arc::new(tokenizer),
                device,
                labels,
            },
            config,
        })
    }

    /// Capitalization heuristic; needs no model files.
    pub fn heuristic() -> Self {
        Self {
            backend: RecognizerBackend::Heuristic,
            config: EntitiesConfig::heuristic(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        matches!(self.backend, RecognizerBackend::Model { .. })
    }

    pub fn config(&self) -> &EntitiesConfig {
        &self.config
    }

    fn extract_with_model(
        &self,
        text: &str,
        classifier: &BertTokenClassifier,
        tokenizer: &Tokenizer,
        device: &Device,
        labels: &[String],
    ) -> NlpResult<Vec<Entity>> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| NlpError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input = ModelInput::from_encoding(&encoding, device)?;
        let logits = classifier
            .forward(&input.input_ids, &input.type_ids, Some(&input.attention_mask))
            .map_err(|e| NlpError::InferenceFailed {
                reason: format!("Token classifier forward pass failed: {}", e),
            })?;

        let predicted: Vec<u32> = logits.squeeze(0)?.argmax(1)?.to_vec1()?;

        let tags: Vec<&str> = predicted
            .iter()
            .map(|&idx| labels.get(idx as usize).map(String::as_str).unwrap_or("O"))
            .collect();

        Ok(decode_bio(
            text,
            encoding.get_offsets(),
            encoding.get_special_tokens_mask(),
            &tags,
        ))
    }
}

/// Decodes per-token BIO tags into entity spans of `text`.
///
/// `offsets` are byte ranges into `text`. Special tokens are skipped. A `B-` tag, a label
/// change, or a gap after an `O` starts a new span; sub-word pieces that touch the current
/// span extend it even when tagged `B-`.
pub fn decode_bio(
    text: &str,
    offsets: &[(usize, usize)],
    special: &[u32],
    tags: &[&str],
) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut current: Option<(EntityLabel, usize, usize)> = None;

    let close = |span: Option<(EntityLabel, usize, usize)>, entities: &mut Vec<Entity>| {
        if let Some((label, start, end)) = span
            && let Some(slice) = text.get(start..end)
        {
            let slice = slice.trim();
            if !slice.is_empty() {
                entities.push(Entity::new(slice, label));
            }
        }
    };

    for (i, &(start, end)) in offsets.iter().enumerate() {
        if special.get(i).copied().unwrap_or(0) == 1 || start == end {
            continue;
        }

        let tag = tags.get(i).copied().unwrap_or("O");
        let Some(label) = EntityLabel::from_tag(tag) else {
            close(current.take(), &mut entities);
            continue;
        };

        let begins = tag.starts_with("B-");

        let extends = matches!(
            &current,
            Some((open, _, span_end)) if *open == label && (!begins || start == *span_end)
        );

        if extends {
            if let Some((_, _, span_end)) = current.as_mut() {
                *span_end = end;
            }
        } else {
            close(current.take(), &mut entities);
            current = Some((label, start, end));
        }
    }

    close(current.take(), &mut entities);
    entities
}

impl EntityExtractor for EntityRecognizer {
    fn extract(&self, text: &str) -> NlpResult<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match &self.backend {
            RecognizerBackend::Model {
                classifier,
                tokenizer,
                device,
                labels,
            } => self.extract_with_model(text, classifier, tokenizer, device, labels),
            RecognizerBackend::Heuristic => Ok(heuristic::extract_persons(text)),
        }
    }
}
