//! Assignment verification library crate (used by the CLI and integration tests).
//!
//! # Pipeline
//!
//! A submitted file goes through [`reader`] (parse, normalize into sentences, infer the
//! author, predict the topic), then [`verification`] compares it against every stored
//! assignment and [`repository`] stores it as part of the corpus.
//!
//! ## Core Types
//! - [`Assignment`], [`AssignmentVerified`] - Stored document and run outcome
//! - [`Verifier`], [`VerifyAssignment`] - Engine and its command
//! - [`AssignmentReader`], [`FileRef`], [`MediaType`] - Document intake
//! - [`AssignmentRepository`], [`FileRepository`] - Persistence
//!
//! ## Capabilities
//! - [`SemanticSimilarity`] / [`SentenceSimilarity`] - Sentence and document similarity
//! - [`EntityExtractor`] / [`EntityRecognizer`] - Person names for author inference
//! - [`TopicPredictor`] / [`TopicClassifier`] - Optional topic labels
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod author;
pub mod config;
pub mod constants;
pub mod domain;
pub mod hashing;
pub mod nlp;
pub mod reader;
pub mod repository;
pub mod text;
pub mod verification;

pub use author::{AuthorConfig, AuthorInferencer};
pub use config::{Config, ConfigError, LogFormat};
pub use constants::{
    DEFAULT_DOCUMENT_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD, MIN_SENTENCE_CHARS, UNKNOWN_AUTHOR,
    UNKNOWN_TITLE, validate_threshold,
};
pub use domain::{
    Assignment, AssignmentCompared, AssignmentStored, AssignmentVerification, AssignmentVerified,
    ComparisonResult, SentenceCompared, Topic,
};
pub use hashing::{content_fingerprint, hash_text};
#[cfg(any(test, feature = "mock"))]
pub use nlp::mock::{MockEntityExtractor, MockSimilarity, MockTopicPredictor};
pub use nlp::{
    EntitiesConfig, Entity, EntityExtractor, EntityLabel, EntityRecognizer, NlpError, NlpResult,
    SemanticSimilarity, SentenceSimilarity, SimilarityConfig, TopicClassifier, TopicConfig,
    TopicPredictor,
};
pub use reader::{AssignmentReader, FileRef, MediaType, ParsedDocument, ReaderError};
#[cfg(any(test, feature = "mock"))]
pub use repository::InMemoryRepository;
pub use repository::{AssignmentRepository, FileRepository, RepositoryError, RepositoryResult};
pub use text::normalize_blocks;
pub use verification::{
    CompareError, Comparator, ComparisonConfig, Verifier, VerifierConfig, VerifyAssignment,
    VerifyError, VerifyResult,
};
