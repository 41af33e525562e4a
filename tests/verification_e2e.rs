//! End-to-end verification over files on disk and a file-backed corpus.

mod common;

use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use common::{DOCX, docx_bytes, heuristic_reader, write_file};
use verifier::domain::Assignment;
use verifier::nlp::SentenceSimilarity;
use verifier::nlp::mock::MockSimilarity;
use verifier::reader::FileRef;
use verifier::repository::{AssignmentRepository, FileRepository};
use verifier::verification::{Verifier, VerifierConfig, VerifyAssignment};

const ORIGINAL: &[&str] = &[
    "Alumna: Sofía Díaz",
    "La economía de la experiencia transforma servicios en recuerdos memorables.",
    "Las empresas diseñan eventos personales para cada uno de sus clientes.",
];

const UNRELATED: &[&str] = &[
    "Alumno: Martín Gómez",
    "Los sistemas emergentes combinan sensores baratos con redes inalámbricas.",
];

struct Harness {
    dir: TempDir,
    verifier: Verifier,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repository = FileRepository::open(dir.path().join("corpus")).unwrap();
        let verifier = Verifier::new(
            heuristic_reader(),
            Arc::new(repository),
            Arc::new(SentenceSimilarity::lexical()),
            VerifierConfig::default().with_workers(2),
        )
        .unwrap();
        Self { dir, verifier }
    }

    fn docx(&self, name: &str, paragraphs: &[&str]) -> VerifyAssignment {
        let path = write_file(self.dir.path(), name, &docx_bytes(paragraphs, Some("TP1")));
        VerifyAssignment::new(FileRef::path(path), DOCX)
    }

    fn reopen(&self) -> FileRepository {
        FileRepository::open(self.dir.path().join("corpus")).unwrap()
    }
}

#[tokio::test]
async fn test_first_submission_has_no_matches() {
    let harness = Harness::new();

    let result = harness
        .verifier
        .verify(harness.docx("original.docx", ORIGINAL))
        .await
        .unwrap();

    assert_eq!(result.author, "Sofía Díaz");
    assert_eq!(result.title.as_deref(), Some("TP1"));
    assert!(result.similarities.is_empty());

    let stored = harness.reopen().find_by(result.id).await.unwrap().unwrap();
    assert_eq!(stored.content.len(), 3);
    assert!(stored.verifications.is_none());
    assert!(stored.date.is_some());
}

#[tokio::test]
async fn test_resubmitted_file_is_exact_match() {
    let harness = Harness::new();

    let original = harness
        .verifier
        .verify(harness.docx("original.docx", ORIGINAL))
        .await
        .unwrap();
    let copy = harness
        .verifier
        .verify(harness.docx("copy.docx", ORIGINAL))
        .await
        .unwrap();

    assert_ne!(original.id, copy.id);
    assert_eq!(copy.similarities.len(), 1);

    let compared = &copy.similarities[0];
    assert_eq!(compared.id, original.id);
    assert_eq!(compared.author, "Sofía Díaz");
    assert_eq!(compared.plagiarism, 1.0);
    assert!(compared.similarities.is_empty());
    assert_eq!(copy.max_plagiarism(), Some(1.0));

    let stored = harness.reopen().find_by(copy.id).await.unwrap().unwrap();
    let verifications = stored.verifications.unwrap();
    assert_eq!(verifications.len(), 1);
    assert_eq!(verifications[0].id, original.id);

    let summary = harness.verifier.lookup(copy.id).await.unwrap().unwrap();
    assert_eq!(summary.similarities, copy.similarities);
}

#[tokio::test]
async fn test_unrelated_submission_records_nothing() {
    let harness = Harness::new();

    harness
        .verifier
        .verify(harness.docx("original.docx", ORIGINAL))
        .await
        .unwrap();
    let other = harness
        .verifier
        .verify(harness.docx("other.docx", UNRELATED))
        .await
        .unwrap();

    assert_eq!(other.author, "Martín Gómez");
    assert!(other.similarities.is_empty());
    assert_eq!(harness.verifier.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_no_detection_stores_without_comparing() {
    let harness = Harness::new();

    harness
        .verifier
        .verify(harness.docx("original.docx", ORIGINAL))
        .await
        .unwrap();
    let copy = harness
        .verifier
        .verify(harness.docx("copy.docx", ORIGINAL).without_detection())
        .await
        .unwrap();

    assert!(copy.similarities.is_empty());
    let stored = harness.reopen().find_by(copy.id).await.unwrap().unwrap();
    assert!(stored.verifications.is_none());
}

#[tokio::test]
async fn test_empty_document_is_not_stored() {
    let harness = Harness::new();

    let result = harness
        .verifier
        .verify(harness.docx("blank.docx", &["   ", "•"]))
        .await
        .unwrap();

    assert_eq!(result.author, "Unknown");
    assert!(result.title.is_none());
    assert!(harness.reopen().find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_imported_corpus_is_compared() {
    let harness = Harness::new();
    let seeded = Assignment::new(vec!["A sentence that was submitted years ago.".to_string()])
        .with_author("Ana");

    let imported = harness
        .verifier
        .import(vec![seeded.clone()])
        .await
        .unwrap();
    assert_eq!(imported, 1);

    let result = harness
        .verifier
        .verify_assignment(
            Assignment::new(vec!["A sentence that was submitted years ago.".to_string()]),
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.similarities.len(), 1);
    assert_eq!(result.similarities[0].id, seeded.id);
}

#[tokio::test]
async fn test_sentence_level_matches_are_persisted() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(FileRepository::open(dir.path()).unwrap());

    let stored = Assignment::new(vec![
        "Digital platforms reduce the cost of matching buyers.".to_string(),
        "Network effects reward the first mover in a market.".to_string(),
    ])
    .with_author("Ana");
    repository.save(stored.clone()).await.unwrap();

    let entry = Assignment::new(vec![
        "Digital platforms reduce the cost of matching buyers.".to_string(),
        "Regulators are only starting to study these markets.".to_string(),
    ]);

    let similarity = MockSimilarity::exact().with_pair(
        &stored.full_text(),
        &entry.full_text(),
        0.995,
    );
    let verifier = Verifier::new(
        heuristic_reader(),
        repository.clone(),
        Arc::new(similarity),
        VerifierConfig::default(),
    )
    .unwrap();

    let result = verifier.verify_assignment(entry.clone(), true).await.unwrap();

    assert_eq!(result.similarities.len(), 1);
    let compared = &result.similarities[0];
    assert_eq!(compared.plagiarism, 0.5);
    assert_eq!(compared.similarities.len(), 1);
    assert_eq!(
        compared.similarities[0].present,
        "Digital platforms reduce the cost of matching buyers."
    );

    let persisted = repository.find_by(entry.id).await.unwrap().unwrap();
    let verification = &persisted.verifications.unwrap()[0];
    assert_eq!(verification.similarities.len(), 1);
    assert_eq!(verification.similarities[0].plagiarism, 1.0);
}

#[tokio::test]
async fn test_lookup_unknown_id() {
    let harness = Harness::new();
    assert!(harness.verifier.lookup(Uuid::new_v4()).await.unwrap().is_none());
}
