//! Reading real files from disk in every supported format.

mod common;

use tempfile::TempDir;

use common::{DOC, DOCX, PDF, doc_bytes, docx_bytes, heuristic_reader, pdf_bytes, write_file};
use verifier::domain::Topic;
use verifier::reader::{FileRef, MediaType, ReaderError};

#[test]
fn test_media_type_from_extension() {
    for (name, expected) in [
        ("tp.pdf", Some(MediaType::Pdf)),
        ("TP.DOCX", Some(MediaType::Docx)),
        ("old.doc", Some(MediaType::Doc)),
        ("notes.txt", None),
        ("no_extension", None),
    ] {
        assert_eq!(
            MediaType::from_extension(std::path::Path::new(name)),
            expected
        );
    }

    assert_eq!(MediaType::Docx.as_str(), DOCX);
    assert_eq!(MediaType::Pdf.as_str(), PDF);
    assert_eq!(MediaType::Doc.as_str(), DOC);
}

#[test]
fn test_read_docx_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "tp.docx",
        &docx_bytes(
            &[
                "Trabajo práctico de Lucía Fernández",
                "• La innovación abierta\ncombina ideas internas y externas.",
            ],
            Some("Innovación abierta"),
        ),
    );

    let assignment = heuristic_reader()
        .read(&FileRef::path(path), DOCX)
        .unwrap();

    assert_eq!(assignment.author, "Lucía Fernández");
    assert_eq!(assignment.title, "Innovación abierta");
    assert_eq!(assignment.topic, Topic::Undefined);
    assert_eq!(
        assignment.content,
        vec![
            "Trabajo práctico de Lucía Fernández".to_string(),
            "La innovación abierta combina ideas internas y externas.".to_string(),
        ]
    );
}

#[test]
fn test_read_pdf_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "tp.pdf",
        &pdf_bytes(
            &["Report by Laura Medina", "Innovation drives regional growth."],
            "Final Report",
        ),
    );

    let assignment = heuristic_reader()
        .read(&FileRef::path(path.clone()), PDF)
        .unwrap();

    assert_eq!(assignment.title, "Final Report");
    assert_eq!(assignment.author, "Laura Medina");
    assert!(
        assignment
            .content
            .iter()
            .any(|s| s.contains("Innovation drives regional growth"))
    );
    assert!(path.exists());
}

#[test]
fn test_read_doc_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "tp.doc",
        &doc_bytes("Autor: Pablo Ríos\rLa economía digital transforma los mercados.\r"),
    );

    let assignment = heuristic_reader()
        .read(&FileRef::path(path), DOC)
        .unwrap();

    assert_eq!(assignment.author, "Pablo Ríos");
    assert!(
        assignment
            .content
            .contains(&"La economía digital transforma los mercados.".to_string())
    );
}

#[test]
fn test_unsupported_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "notes.txt", b"Plain text notes by Ana Torres.");

    let assignment = heuristic_reader()
        .read(&FileRef::path(path), "text/plain")
        .unwrap();

    assert!(!assignment.has_content());
    assert!(assignment.is_author_unknown());
    assert!(assignment.date.is_some());
}

#[test]
fn test_corrupt_files_are_parse_errors() {
    let dir = TempDir::new().unwrap();
    let reader = heuristic_reader();

    for (name, media_type) in [("bad.docx", DOCX), ("bad.pdf", PDF), ("bad.doc", DOC)] {
        let path = write_file(dir.path(), name, b"definitely not a document");
        let err = reader.read(&FileRef::path(path), media_type).unwrap_err();
        assert!(
            matches!(err, ReaderError::Parse { .. }),
            "{name}: unexpected error {err:?}"
        );
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = heuristic_reader()
        .read(&FileRef::path(dir.path().join("missing.docx")), DOCX)
        .unwrap_err();

    assert!(matches!(err, ReaderError::Io(_)));
}

#[tokio::test]
async fn test_read_async_from_bytes() {
    let reader = heuristic_reader();
    let bytes = docx_bytes(&["Alumno: Tomás Herrera", "Los sistemas emergentes crecen."], None);

    let assignment = reader
        .read_async(FileRef::bytes(bytes), DOCX.to_string())
        .await
        .unwrap();

    assert_eq!(assignment.author, "Tomás Herrera");
    assert_eq!(assignment.title, "Unknown");
    assert_eq!(assignment.sentence_count(), 2);
}
