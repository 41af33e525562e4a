//! Reads submitted files into [`Assignment`]s.
//!
//! Parsing is dispatched on [`MediaType`]: PDF yields one block per page, DOCX one block
//! per paragraph, and legacy DOC the whole text. Blocks go through the normalizer; the
//! author is inferred from the parser's author sample and the topic, when a predictor is
//! configured, is predicted once over the whole text.

pub mod doc;
pub mod docx;
mod error;
pub mod media;
pub mod pdf;
pub mod source;


pub use error::{ReaderError, ReaderResult};
pub use media::MediaType;
pub use source::{FileRef, LocalFile};

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::author::AuthorInferencer;
use crate::constants::UNKNOWN_TITLE;
use crate::domain::{Assignment, Topic};
use crate::nlp::TopicPredictor;
use crate::text::{normalize_blocks, strip_glyphs};

/// Raw output of a format parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Pages, paragraphs or whole text, in document order.
    pub blocks: Vec<String>,
    /// Text sections scanned, in order, for the author's name.
    pub author_sections: Vec<String>,
    /// Title from document metadata.
    pub title: Option<String>,
}

/// Runs the parser for `media_type`.
pub fn parse(file: &FileRef, media_type: MediaType) -> ReaderResult<ParsedDocument> {
    match media_type {
        MediaType::Pdf => {
            let local = file.materialize()?;
            pdf::parse(local.path())
        }
        MediaType::Docx => docx::parse(&file.read_bytes()?),
        MediaType::Doc => doc::parse(&file.read_bytes()?),
    }
}

/// Turns submitted files into normalized assignments.
#[derive(Clone)]
pub struct AssignmentReader {
    authors: AuthorInferencer,
    topics: Option<Arc<dyn TopicPredictor>>,
}

impl std::fmt::Debug for AssignmentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentReader")
            .field("authors", &self.authors)
            .field("topics", &self.topics.is_some())
            .finish()
    }
}

impl AssignmentReader {
    pub fn new(authors: AuthorInferencer, topics: Option<Arc<dyn TopicPredictor>>) -> Self {
        if topics.is_none() {
            debug!("No topic predictor configured, topics will be Undefined");
        }
        Self { authors, topics }
    }

    /// Reads a file with a declared MIME type.
    ///
    /// An unsupported type yields an empty assignment rather than an error; callers that
    /// want to reject such input should resolve the type with [`MediaType::resolve`] first.
    pub fn read(&self, file: &FileRef, media_type: &str) -> ReaderResult<Assignment> {
        match media_type.parse::<MediaType>() {
            Ok(media_type) => self.read_as(file, media_type),
            Err(_) => {
                warn!(media_type, "Unsupported media type, returning empty assignment");
                Ok(self.finish(Assignment::empty()))
            }
        }
    }

    /// Reads a file of a known format.
    #[instrument(skip(self, file, media_type), fields(media_type = %media_type))]
    pub fn read_as(&self, file: &FileRef, media_type: MediaType) -> ReaderResult<Assignment> {
        let parsed = parse(file, media_type)?;
        self.build(parsed)
    }

    /// Builds an assignment from parser output.
    pub fn build(&self, parsed: ParsedDocument) -> ReaderResult<Assignment> {
        let content = normalize_blocks(&parsed.blocks);
        let title = parsed.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let mut assignment = Assignment::new(content).with_title(title);

        if !assignment.has_content() {
            debug!("Document has no sentences");
            return Ok(self.finish(assignment));
        }

        let sections: Vec<String> = parsed
            .author_sections
            .iter()
            .map(|section| strip_glyphs(section))
            .collect();
        assignment.author = self.authors.infer(&sections)?;
        assignment.topic = self.predict_topic(&assignment.full_text());

        debug!(
            sentences = assignment.sentence_count(),
            author = %assignment.author,
            topic = %assignment.topic,
            "Read assignment"
        );

        Ok(self.finish(assignment))
    }

    /// Reads on the blocking pool; parsing and model inference are CPU bound.
    pub async fn read_async(
        self: &Arc<Self>,
        file: FileRef,
        media_type: String,
    ) -> ReaderResult<Assignment> {
        let reader = Arc::clone(self);
        tokio::task::spawn_blocking(move || reader.read(&file, &media_type))
            .await
            .map_err(|e| ReaderError::Task {
                reason: e.to_string(),
            })?
    }

    fn predict_topic(&self, text: &str) -> Topic {
        let Some(predictor) = &self.topics else {
            return Topic::Undefined;
        };

        match predictor.predict(text) {
            Ok(topic) => topic,
            Err(e) => {
                warn!(error = %e, "Topic prediction failed, leaving topic Undefined");
                Topic::Undefined
            }
        }
    }

    fn finish(&self, assignment: Assignment) -> Assignment {
        assignment.with_date(chrono::Local::now().date_naive())
    }
}
