//! Sentence similarity.
//!
//! [`SentenceSimilarity`] mean-pools a BERT sentence encoder and scores pairs by cosine
//! similarity. Without a model it falls back to a term-frequency cosine.

pub mod config;
pub mod lexical;

#[cfg(test)]
mod tests;

pub use config::SimilarityConfig;

use std::sync::Arc;

use candle_core::{Device, Tensor};
use moka::sync::Cache;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::{BertEncoder, ModelInput};
use super::device::select_device;
use super::error::{NlpError, NlpResult};
use super::utils::{check_model_dir, load_tokenizer_with_truncation};
use super::SemanticSimilarity;
use crate::hashing::hash_text;

enum SimilarityBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Arc<Tokenizer>,
        device: Device,
        cache: Option<Cache<[u8; 32], Arc<Vec<f32>>>>,
    },
    Lexical,
}

/// Semantic similarity between sentences (supports a lexical fallback).
pub struct SentenceSimilarity {
    backend: SimilarityBackend,
    config: SimilarityConfig,
}

impl std::fmt::Debug for SentenceSimilarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceSimilarity")
            .field(
                "backend",
                &match &self.backend {
                    SimilarityBackend::Model { device, .. } => format!("Model({:?})", device),
                    SimilarityBackend::Lexical => "Lexical".to_string(),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceSimilarity {
    /// Loads the encoder named by `config`, or the lexical backend if none is configured.
    ///
    /// A configured model that cannot be loaded is an error, never a silent fallback.
    pub fn load(config: SimilarityConfig) -> NlpResult<Self> {
        config
            .validate()
            .map_err(|reason| NlpError::InvalidConfig { reason })?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("No similarity model configured, using lexical similarity");
            return Ok(Self::lexical());
        };

        if !model_path.exists() {
            return Err(NlpError::ModelNotFound { path: model_path });
        }
        check_model_dir(&model_path).map_err(|reason| NlpError::ModelLoadFailed { reason })?;

        let device = select_device();
        debug!(?device, "Selected compute device for sentence similarity");

        info!(model_path = %model_path.display(), "Loading sentence encoder");

        let encoder =
            BertEncoder::load(&model_path, &device).map_err(|e| NlpError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_seq_len)
            .map_err(|e| NlpError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let cache = (config.cache_capacity > 0).then(|| Cache::new(config.cache_capacity));

        info!(
            cache_capacity = config.cache_capacity,
            "Sentence encoder loaded successfully"
        );

        Ok(Self {
            backend: SimilarityBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
                device,
                cache,
            },
            config,
        })
    }

    /// Term-frequency cosine backend; needs no model files.
    pub fn lexical() -> Self {
        Self {
            backend: SimilarityBackend::Lexical,
            config: SimilarityConfig::lexical(),
        }
    }

    /// Returns `true` if a transformer model is loaded.
    pub fn is_model_loaded(&self) -> bool {
        matches!(self.backend, SimilarityBackend::Model { .. })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// L2-normalized mean-pooled embedding of `text`.
    pub fn embed(&self, text: &str) -> NlpResult<Arc<Vec<f32>>> {
        let SimilarityBackend::Model {
            encoder,
            tokenizer,
            device,
            cache,
        } = &self.backend
        else {
            return Err(NlpError::Unavailable {
                reason: "no sentence encoder loaded".to_string(),
            });
        };

        let key = hash_text(text);
        if let Some(hit) = cache.as_ref().and_then(|c| c.get(&key)) {
            return Ok(hit);
        }

        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| NlpError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input = ModelInput::from_encoding(&encoding, device)?;
        let hidden = encoder
            .forward(&input.input_ids, &input.type_ids, Some(&input.attention_mask))
            .map_err(|e| NlpError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let embedding = Arc::new(normalize(mean_pool(&hidden, &input.attention_mask)?));

        if let Some(cache) = cache {
            cache.insert(key, Arc::clone(&embedding));
        }

        Ok(embedding)
    }
}

/// Attention-masked mean over the sequence axis of a `[1, seq, hidden]` tensor.
fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> NlpResult<Vec<f32>> {
    let mask = attention_mask.to_dtype(hidden.dtype())?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let count = mask.sum(1)?;
    let pooled = summed.broadcast_div(&count)?;
    Ok(pooled.squeeze(0)?.to_vec1::<f32>()?)
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }
    embedding
}

/// Cosine similarity of two unit vectors, clamped to `[0, 1]`.
pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    if dot.is_nan() {
        return 0.0;
    }
    dot.clamp(0.0, 1.0)
}

impl SemanticSimilarity for SentenceSimilarity {
    fn similarity(&self, a: &str, b: &str) -> NlpResult<f32> {
        if a == b {
            return Ok(1.0);
        }

        match &self.backend {
            SimilarityBackend::Model { .. } => {
                let left = self.embed(a)?;
                let right = self.embed(b)?;
                Ok(cosine(&left, &right))
            }
            SimilarityBackend::Lexical => Ok(lexical::similarity(a, b)),
        }
    }
}
