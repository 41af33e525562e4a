use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};

fn default_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn default_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

/// Main subject of an assignment, as predicted by the topic classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[default]
    #[serde(rename = "Undefined")]
    Undefined,
    #[serde(rename = "Experience Economy")]
    ExperienceEconomy,
    #[serde(rename = "Emerging Systems")]
    EmergingSystems,
    #[serde(rename = "Digital Economy")]
    DigitalEconomy,
    #[serde(rename = "Innovation")]
    Innovation,
}

impl Topic {
    /// All labels, in classifier index order.
    pub const ALL: [Topic; 5] = [
        Topic::Undefined,
        Topic::ExperienceEconomy,
        Topic::EmergingSystems,
        Topic::DigitalEconomy,
        Topic::Innovation,
    ];

    /// Human readable label (also the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Undefined => "Undefined",
            Topic::ExperienceEconomy => "Experience Economy",
            Topic::EmergingSystems => "Emerging Systems",
            Topic::DigitalEconomy => "Digital Economy",
            Topic::Innovation => "Innovation",
        }
    }

    /// Parses a classifier label, ignoring case and separators.
    ///
    /// `"Digital Economy"`, `"DIGITAL_ECONOMY"` and `"digital-economy"` all map to
    /// [`Topic::DigitalEconomy`].
    pub fn from_label(label: &str) -> Option<Topic> {
        let wanted: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL.into_iter().find(|topic| {
            let candidate: String = topic
                .as_str()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            candidate == wanted
        })
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sentence-level hit stored with a verification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Sentence from the stored document.
    pub present: String,
    /// Sentence from the submitted document.
    pub compared: String,
    /// Similarity in `[0, 1]`.
    pub plagiarism: f32,
}

/// Outcome of comparing a submission against one stored assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentVerification {
    /// Id of the stored assignment that was compared.
    pub id: Uuid,
    #[serde(default = "default_author")]
    pub author: String,
    /// Aggregate score in `[0, 1]`.
    pub plagiarism: f32,
    #[serde(default)]
    pub similarities: Vec<ComparisonResult>,
}

/// A submitted academic assignment, normalized into sentences.
///
/// Equality follows the resubmission contract: two assignments are equal when the same
/// author submits the same content. Ids, titles and verification records are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub topic: Topic,
    /// Ordered, normalized sentences.
    pub content: Vec<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Present only once a verification run recorded comparisons.
    #[serde(default, rename = "similarities")]
    pub verifications: Option<Vec<AssignmentVerification>>,
}

impl Assignment {
    /// Creates an assignment with a fresh id and default metadata.
    pub fn new(content: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: default_title(),
            author: default_author(),
            topic: Topic::default(),
            content,
            date: None,
            verifications: None,
        }
    }

    /// Creates an assignment with no content (unsupported or unreadable input).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Returns `true` if there is at least one sentence to check.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if no author could be inferred.
    pub fn is_author_unknown(&self) -> bool {
        self.author == UNKNOWN_AUTHOR
    }

    /// Whole document as one string (sentences joined by a space).
    pub fn full_text(&self) -> String {
        self.content.join(" ")
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.content == other.content
    }
}
