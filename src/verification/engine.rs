use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::command::VerifyAssignment;
use super::comparator::Comparator;
use super::config::VerifierConfig;
use super::error::{VerifyError, VerifyResult};
use super::pool::compare_corpus;
use crate::domain::{Assignment, AssignmentCompared, AssignmentStored, AssignmentVerified};
use crate::hashing::content_fingerprint;
use crate::nlp::SemanticSimilarity;
use crate::reader::AssignmentReader;
use crate::repository::AssignmentRepository;

/// Verification engine: reads a submission, compares it against the stored corpus and
/// stores it as part of the corpus.
pub struct Verifier {
    reader: Arc<AssignmentReader>,
    repository: Arc<dyn AssignmentRepository>,
    comparator: Arc<Comparator>,
    config: VerifierConfig,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("reader", &self.reader)
            .field("config", &self.config)
            .finish()
    }
}

impl Verifier {
    pub fn new(
        reader: Arc<AssignmentReader>,
        repository: Arc<dyn AssignmentRepository>,
        similarity: Arc<dyn SemanticSimilarity>,
        config: VerifierConfig,
    ) -> VerifyResult<Self> {
        config
            .validate()
            .map_err(|reason| VerifyError::InvalidConfig { reason })?;

        let comparator = Arc::new(Comparator::new(similarity, config.comparison));

        Ok(Self {
            reader,
            repository,
            comparator,
            config,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Reads the submitted file and verifies it.
    #[instrument(skip(self, command), fields(id = %command.id, media_type = %command.media_type))]
    pub async fn verify(&self, command: VerifyAssignment) -> VerifyResult<AssignmentVerified> {
        let assignment = self
            .reader
            .read_async(command.file, command.media_type)
            .await?
            .with_id(command.id);

        self.verify_assignment(assignment, command.verify).await
    }

    /// Verifies an already-read assignment and stores it.
    ///
    /// An assignment without sentences is neither compared nor stored. With detection off
    /// (per call or by configuration) it is stored without comparisons.
    #[instrument(skip(self, assignment), fields(id = %assignment.id))]
    pub async fn verify_assignment(
        &self,
        mut assignment: Assignment,
        detect: bool,
    ) -> VerifyResult<AssignmentVerified> {
        if !assignment.has_content() {
            info!(author = %assignment.author, "Submission has no content to verify");
            return Ok(AssignmentVerified::unknown(assignment.id, assignment.author));
        }

        let corpus: Vec<Assignment> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .filter(|stored| stored.id != assignment.id)
            .collect();

        debug!(
            corpus = corpus.len(),
            sentences = assignment.sentence_count(),
            fingerprint = content_fingerprint(&assignment.content),
            "Fetched corpus"
        );

        let comparisons = if detect && self.config.detection_enabled {
            self.compare(&assignment, corpus).await
        } else {
            info!("Plagiarism detection disabled, storing without comparison");
            Vec::new()
        };

        if !comparisons.is_empty() {
            assignment.verifications =
                Some(comparisons.iter().cloned().map(Into::into).collect());
        }

        let stored = self.repository.save(assignment).await?;

        info!(
            author = %stored.author,
            matches = comparisons.len(),
            "Assignment verified"
        );

        Ok(AssignmentVerified {
            id: stored.id,
            title: Some(stored.title),
            author: stored.author,
            similarities: comparisons,
        })
    }

    async fn compare(
        &self,
        assignment: &Assignment,
        corpus: Vec<Assignment>,
    ) -> Vec<AssignmentCompared> {
        let entry = Arc::new(assignment.clone());

        compare_corpus(
            Arc::clone(&self.comparator),
            entry,
            corpus,
            self.config.workers,
        )
        .await
        .into_iter()
        .filter(AssignmentCompared::is_noteworthy)
        .collect()
    }

    /// Verification summary of a stored assignment.
    pub async fn lookup(&self, id: Uuid) -> VerifyResult<Option<AssignmentVerified>> {
        Ok(self
            .repository
            .find_by(id)
            .await?
            .map(|stored| AssignmentVerified::from_assignment(&stored)))
    }

    /// Listing view of every stored assignment.
    pub async fn list(&self) -> VerifyResult<Vec<AssignmentStored>> {
        Ok(self
            .repository
            .find_all()
            .await?
            .iter()
            .map(AssignmentStored::from)
            .collect())
    }

    /// Stores assignments as-is (corpus seeding); returns how many were stored.
    pub async fn import(&self, assignments: Vec<Assignment>) -> VerifyResult<usize> {
        let mut stored = 0;
        for assignment in assignments {
            self.repository.save(assignment).await?;
            stored += 1;
        }
        info!(stored, "Imported assignments");
        Ok(stored)
    }
}
