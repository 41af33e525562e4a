//! NLP capabilities used by the pipeline.
//!
//! Each capability is a trait so the reader and the verifier can run against a loaded
//! transformer model, a lightweight fallback, or a test double:
//!
//! - [`SemanticSimilarity`]: score two texts in `[0, 1]` ([`similarity`]).
//! - [`EntityExtractor`]: find named entities, used for author inference ([`entities`]).
//! - [`TopicPredictor`]: classify a document into a [`Topic`] ([`topic`]).
//!
//! Implementations must be safe to call concurrently from worker threads.

/// BERT wrappers (encoder, sequence and token classifiers).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Named entity recognition.
pub mod entities;
mod error;
/// Sentence similarity.
pub mod similarity;
/// Topic classification.
pub mod topic;
/// Tokenizer/model loading helpers.
pub mod utils;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use entities::{EntitiesConfig, EntityRecognizer};
pub use error::{NlpError, NlpResult};
pub use similarity::{SentenceSimilarity, SimilarityConfig};
pub use topic::{TopicClassifier, TopicConfig};

use serde::{Deserialize, Serialize};

use crate::domain::Topic;

/// Entity categories a recognizer can emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Miscellaneous,
}

impl EntityLabel {
    /// Maps a model tag (`PER`, `B-ORG`, `LOC`...) to a label.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag
            .strip_prefix("B-")
            .or_else(|| tag.strip_prefix("I-"))
            .unwrap_or(tag);

        match tag.to_ascii_uppercase().as_str() {
            "PER" | "PERSON" => Some(Self::Person),
            "ORG" | "ORGANIZATION" => Some(Self::Organization),
            "LOC" | "LOCATION" | "GPE" => Some(Self::Location),
            "MISC" | "MISCELLANEOUS" => Some(Self::Miscellaneous),
            _ => None,
        }
    }
}

/// A named entity found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn person(text: impl Into<String>) -> Self {
        Self::new(text, EntityLabel::Person)
    }
}

/// Scores how similar two texts are in meaning.
pub trait SemanticSimilarity: Send + Sync {
    /// Returns a score in `[0, 1]`; identical texts score `1.0`.
    fn similarity(&self, a: &str, b: &str) -> NlpResult<f32>;
}

/// Finds named entities in text, in order of appearance.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> NlpResult<Vec<Entity>>;

    /// Person names only, in order of appearance.
    fn extract_persons(&self, text: &str) -> NlpResult<Vec<String>> {
        Ok(self
            .extract(text)?
            .into_iter()
            .filter(|entity| entity.label == EntityLabel::Person)
            .map(|entity| entity.text)
            .collect())
    }
}

/// Predicts the main topic of a document.
pub trait TopicPredictor: Send + Sync {
    fn predict(&self, text: &str) -> NlpResult<Topic>;
}
