//! Test doubles for the NLP capabilities.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::error::{NlpError, NlpResult};
use super::{Entity, EntityExtractor, SemanticSimilarity, TopicPredictor};
use crate::domain::Topic;

type ScoreFn = dyn Fn(&str, &str) -> f32 + Send + Sync;

/// Similarity double with scripted scores, call counting and injectable failures.
pub struct MockSimilarity {
    score: Box<ScoreFn>,
    pairs: HashMap<(String, String), f32>,
    failing: Vec<String>,
    calls: AtomicUsize,
    log: Mutex<Vec<(String, String)>>,
}

impl std::fmt::Debug for MockSimilarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSimilarity")
            .field("pairs", &self.pairs.len())
            .field("calls", &self.call_count())
            .finish()
    }
}

impl MockSimilarity {
    /// Scores every pair with `score`.
    pub fn with_fn<F>(score: F) -> Self
    where
        F: Fn(&str, &str) -> f32 + Send + Sync + 'static,
    {
        Self {
            score: Box::new(score),
            pairs: HashMap::new(),
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    /// `1.0` for identical texts, `0.0` otherwise.
    pub fn exact() -> Self {
        Self::with_fn(|a, b| if a == b { 1.0 } else { 0.0 })
    }

    /// The same score for every pair.
    pub fn constant(score: f32) -> Self {
        Self::with_fn(move |_, _| score)
    }

    /// Overrides the score of one pair (in either order).
    pub fn with_pair(mut self, a: &str, b: &str, score: f32) -> Self {
        self.pairs.insert((a.to_string(), b.to_string()), score);
        self.pairs.insert((b.to_string(), a.to_string()), score);
        self
    }

    /// Fails any call where either text contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every `(a, b)` pair scored so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.log.lock().clone()
    }

    /// Returns `true` if `text` appeared on either side of any call.
    pub fn was_called_with(&self, text: &str) -> bool {
        self.log.lock().iter().any(|(a, b)| a == text || b == text)
    }
}

impl SemanticSimilarity for MockSimilarity {
    fn similarity(&self, a: &str, b: &str) -> NlpResult<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push((a.to_string(), b.to_string()));

        if self
            .failing
            .iter()
            .any(|needle| a.contains(needle.as_str()) || b.contains(needle.as_str()))
        {
            return Err(NlpError::InferenceFailed {
                reason: "mock similarity failure".to_string(),
            });
        }

        if let Some(score) = self.pairs.get(&(a.to_string(), b.to_string())) {
            return Ok(*score);
        }

        Ok((self.score)(a, b))
    }
}

type ExtractFn = dyn Fn(&str) -> Vec<Entity> + Send + Sync;

/// Entity extractor double.
pub struct MockEntityExtractor {
    extract: Box<ExtractFn>,
    calls: AtomicUsize,
}

impl MockEntityExtractor {
    pub fn with_fn<F>(extract: F) -> Self
    where
        F: Fn(&str) -> Vec<Entity> + Send + Sync + 'static,
    {
        Self {
            extract: Box::new(extract),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the same person names for every text.
    pub fn persons<S: Into<String>>(names: Vec<S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::with_fn(move |_| names.iter().cloned().map(Entity::person).collect())
    }

    /// Returns as persons the listed names that occur in the text, in listed order.
    pub fn known_persons<S: Into<String>>(names: Vec<S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::with_fn(move |text| {
            names
                .iter()
                .filter(|name| text.contains(name.as_str()))
                .cloned()
                .map(Entity::person)
                .collect()
        })
    }

    /// Finds nothing.
    pub fn empty() -> Self {
        Self::with_fn(|_| Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntityExtractor for MockEntityExtractor {
    fn extract(&self, text: &str) -> NlpResult<Vec<Entity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.extract)(text))
    }
}

/// Topic predictor double returning a fixed topic.
#[derive(Debug)]
pub struct MockTopicPredictor {
    topic: Topic,
    calls: AtomicUsize,
}

impl MockTopicPredictor {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TopicPredictor for MockTopicPredictor {
    fn predict(&self, _text: &str) -> NlpResult<Topic> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.topic)
    }
}
