//! Events produced by the verification pipeline.
//!
//! Events are the outward shape of a run (camelCase JSON). They convert to and from the
//! persisted records in [`super::assignment`].

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assignment::{Assignment, AssignmentVerification, ComparisonResult, Topic};
use crate::constants::UNKNOWN_AUTHOR;

/// A sentence pair and its similarity.
///
/// Identity is the full `(present, compared, plagiarism)` triple; the score is compared
/// bitwise so the type can live in a hash set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceCompared {
    /// Sentence from the stored assignment.
    pub present: String,
    /// Sentence from the submission.
    pub compared: String,
    /// Similarity in `[0, 1]`.
    #[serde(default)]
    pub plagiarism: f32,
}

impl SentenceCompared {
    pub fn new(present: impl Into<String>, compared: impl Into<String>, plagiarism: f32) -> Self {
        Self {
            present: present.into(),
            compared: compared.into(),
            plagiarism,
        }
    }
}

impl PartialEq for SentenceCompared {
    fn eq(&self, other: &Self) -> bool {
        self.present == other.present
            && self.compared == other.compared
            && self.plagiarism.to_bits() == other.plagiarism.to_bits()
    }
}

impl Eq for SentenceCompared {}

impl Hash for SentenceCompared {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.present.hash(state);
        self.compared.hash(state);
        self.plagiarism.to_bits().hash(state);
    }
}

/// Result of comparing a submission against one stored assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCompared {
    /// Id of the stored assignment.
    pub id: Uuid,
    pub author: String,
    /// Sum of kept sentence scores over the submission's sentence count.
    #[serde(default)]
    pub plagiarism: f32,
    #[serde(default)]
    pub similarities: Vec<SentenceCompared>,
}

impl AssignmentCompared {
    /// A comparison that found nothing.
    pub fn clean(present: &Assignment) -> Self {
        Self {
            id: present.id,
            author: present.author.clone(),
            plagiarism: 0.0,
            similarities: Vec::new(),
        }
    }

    /// Returns `true` if the comparison is worth recording.
    ///
    /// Sentence hits always are; so is a positive score with no sentences, which is how a
    /// whole-document exact match is reported.
    pub fn is_noteworthy(&self) -> bool {
        !self.similarities.is_empty() || self.plagiarism > 0.0
    }
}

/// Outcome of a verification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentVerified {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub author: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similarities: Vec<AssignmentCompared>,
}

impl AssignmentVerified {
    /// Result for a submission with nothing to check: only `id` and `author`.
    pub fn unknown(id: Uuid, author: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            author: author.into(),
            similarities: Vec::new(),
        }
    }

    /// Builds the verification summary of a persisted assignment.
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let similarities = assignment
            .verifications
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(AssignmentCompared::from)
            .collect();

        Self {
            id: assignment.id,
            title: Some(assignment.title.clone()),
            author: assignment.author.clone(),
            similarities,
        }
    }

    /// Highest per-assignment score, if any comparison was kept.
    pub fn max_plagiarism(&self) -> Option<f32> {
        self.similarities
            .iter()
            .map(|c| c.plagiarism)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Listing view of a stored assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStored {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub topic: Topic,
    pub content: Vec<String>,
}

impl From<&Assignment> for AssignmentStored {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title.clone(),
            author: assignment.author.clone(),
            topic: assignment.topic,
            content: assignment.content.clone(),
        }
    }
}

impl From<SentenceCompared> for ComparisonResult {
    fn from(value: SentenceCompared) -> Self {
        Self {
            present: value.present,
            compared: value.compared,
            plagiarism: value.plagiarism,
        }
    }
}

impl From<&ComparisonResult> for SentenceCompared {
    fn from(value: &ComparisonResult) -> Self {
        Self::new(value.present.clone(), value.compared.clone(), value.plagiarism)
    }
}

impl From<AssignmentCompared> for AssignmentVerification {
    fn from(value: AssignmentCompared) -> Self {
        Self {
            id: value.id,
            author: value.author,
            plagiarism: value.plagiarism,
            similarities: value.similarities.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&AssignmentVerification> for AssignmentCompared {
    fn from(value: &AssignmentVerification) -> Self {
        Self {
            id: value.id,
            author: if value.author.is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                value.author.clone()
            },
            plagiarism: value.plagiarism,
            similarities: value.similarities.iter().map(Into::into).collect(),
        }
    }
}
