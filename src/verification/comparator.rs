use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::ComparisonConfig;
use super::error::CompareError;
use crate::constants::EXACT_MATCH_SCORE;
use crate::domain::{Assignment, AssignmentCompared, SentenceCompared};
use crate::nlp::SemanticSimilarity;

/// Two-tier comparison of a submission against one stored assignment.
///
/// A whole-document score below the document threshold ends the comparison with `0.0`;
/// an exact whole-document match ends it with `1.0`. Otherwise every submitted sentence is
/// matched against the stored sentences in order, keeping the first one at or above the
/// sentence threshold.
#[derive(Clone)]
pub struct Comparator {
    similarity: Arc<dyn SemanticSimilarity>,
    config: ComparisonConfig,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("config", &self.config)
            .finish()
    }
}

impl Comparator {
    pub fn new(similarity: Arc<dyn SemanticSimilarity>, config: ComparisonConfig) -> Self {
        Self { similarity, config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Returns `true` if the sentence is too short to be compared.
    pub fn is_exempt(&self, sentence: &str) -> bool {
        sentence.chars().count() < self.config.min_sentence_chars
    }

    /// Similarity of two sentences; `0.0` without a call if either is exempt.
    pub fn compare_sentence(&self, compared: &str, present: &str) -> Result<f32, CompareError> {
        if self.is_exempt(compared) || self.is_exempt(present) {
            return Ok(0.0);
        }
        Ok(self.similarity.similarity(compared, present)?)
    }

    /// First stored sentence matching `compared`, scanning in order.
    pub fn first_match(
        &self,
        compared: &str,
        present: &Assignment,
    ) -> Result<Option<SentenceCompared>, CompareError> {
        for candidate in &present.content {
            let score = self.compare_sentence(compared, candidate)?;
            if score >= self.config.similarity_threshold {
                return Ok(Some(SentenceCompared::new(candidate.as_str(), compared, score)));
            }
        }
        Ok(None)
    }

    /// Compares the submission `entry` against the stored `present` assignment.
    pub fn compare(
        &self,
        present: &Assignment,
        entry: &Assignment,
    ) -> Result<AssignmentCompared, CompareError> {
        let mut result = AssignmentCompared::clean(present);

        let document_score = self
            .similarity
            .similarity(&present.full_text(), &entry.full_text())?;

        if document_score < self.config.document_threshold {
            trace!(present = %present.id, score = document_score, "Below document threshold");
            return Ok(result);
        }

        if document_score >= EXACT_MATCH_SCORE {
            debug!(present = %present.id, "Exact document match");
            result.plagiarism = EXACT_MATCH_SCORE;
            return Ok(result);
        }

        let mut seen: HashSet<SentenceCompared> = HashSet::new();
        for sentence in &entry.content {
            if let Some(hit) = self.first_match(sentence, present)?
                && seen.insert(hit.clone())
            {
                result.similarities.push(hit);
            }
        }

        result.plagiarism = aggregate(&result.similarities, entry.sentence_count());

        debug!(
            present = %present.id,
            document_score,
            hits = result.similarities.len(),
            plagiarism = result.plagiarism,
            "Compared sentences"
        );

        Ok(result)
    }
}

/// Sum of hit scores over the submission's sentence count.
pub fn aggregate(hits: &[SentenceCompared], sentence_count: usize) -> f32 {
    if sentence_count == 0 {
        return 0.0;
    }
    let total: f32 = hits.iter().map(|hit| hit.plagiarism).sum();
    (total / sentence_count as f32).clamp(0.0, 1.0)
}
