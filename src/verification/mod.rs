//! The verification engine.
//!
//! [`Verifier`] orchestrates a run: read the submission, fetch the corpus, compare against
//! every stored assignment on a bounded worker pool ([`pool`]), keep the noteworthy
//! comparisons, and store the submission. [`Comparator`] holds the per-pair algorithm.

pub mod command;
pub mod comparator;
pub mod config;
pub mod engine;
mod error;
pub mod pool;


pub use command::VerifyAssignment;
pub use comparator::{Comparator, aggregate};
pub use config::{ComparisonConfig, VerifierConfig, default_workers};
pub use engine::Verifier;
pub use error::{CompareError, VerifyError, VerifyResult};
pub use pool::{compare_corpus, compare_corpus_sequential};
