use super::*;
use crate::constants::UNKNOWN_AUTHOR;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

fn sample_assignment() -> Assignment {
    Assignment::new(vec!["content".to_string()])
        .with_author("author")
        .with_title("title")
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
}

#[test]
fn test_assignment_instantiation() {
    let assignment = sample_assignment();

    assert!(!assignment.id.is_nil());
    assert_eq!(assignment.author, "author");
    assert_eq!(assignment.title, "title");
    assert_eq!(assignment.content, vec!["content".to_string()]);
    assert_eq!(assignment.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(assignment.topic, Topic::Undefined);
    assert!(assignment.verifications.is_none());
}

#[test]
fn test_assignment_defaults() {
    let assignment = Assignment::empty();

    assert_eq!(assignment.author, UNKNOWN_AUTHOR);
    assert_eq!(assignment.title, "Unknown");
    assert!(assignment.is_author_unknown());
    assert!(!assignment.has_content());
}

#[test]
fn test_equality_ignores_id_and_title() {
    let a = sample_assignment();
    let b = sample_assignment().with_title("another title");

    assert_ne!(a.id, b.id);
    assert_eq!(a, b);
}

#[test]
fn test_equality_requires_same_author_and_content() {
    let a = sample_assignment();

    assert_ne!(a, sample_assignment().with_author("someone else"));
    assert_ne!(
        a,
        Assignment::new(vec!["other".to_string()]).with_author("author")
    );
}

#[test]
fn test_full_text_joins_sentences() {
    let assignment = Assignment::new(vec!["First one.".into(), "Second one.".into()]);

    assert_eq!(assignment.full_text(), "First one. Second one.");
    assert_eq!(assignment.sentence_count(), 2);
}

#[test]
fn test_topic_serialization_uses_labels() {
    let json = serde_json::to_string(&Topic::ExperienceEconomy).unwrap();
    assert_eq!(json, "\"Experience Economy\"");

    let topic: Topic = serde_json::from_str("\"Digital Economy\"").unwrap();
    assert_eq!(topic, Topic::DigitalEconomy);
}

#[test]
fn test_topic_from_label_is_lenient() {
    assert_eq!(Topic::from_label("EMERGING_SYSTEMS"), Some(Topic::EmergingSystems));
    assert_eq!(Topic::from_label("innovation"), Some(Topic::Innovation));
    assert_eq!(Topic::from_label("experience-economy"), Some(Topic::ExperienceEconomy));
    assert_eq!(Topic::from_label("astronomy"), None);
}

#[test]
fn test_persisted_shape() {
    let mut assignment = sample_assignment();
    assignment.verifications = Some(vec![AssignmentVerification {
        id: Uuid::new_v4(),
        author: "Ana".into(),
        plagiarism: 0.5,
        similarities: vec![ComparisonResult {
            present: "a".into(),
            compared: "b".into(),
            plagiarism: 0.97,
        }],
    }]);

    let value = serde_json::to_value(&assignment).unwrap();

    for key in ["id", "title", "author", "topic", "content", "date", "similarities"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["similarities"][0]["similarities"][0]["present"], "a");
}

#[test]
fn test_assignment_deserializes_with_defaults() {
    let id = Uuid::new_v4();
    let json = format!(r#"{{"id":"{id}","content":["One sentence here."]}}"#);

    let assignment: Assignment = serde_json::from_str(&json).unwrap();

    assert_eq!(assignment.id, id);
    assert_eq!(assignment.author, UNKNOWN_AUTHOR);
    assert_eq!(assignment.topic, Topic::Undefined);
    assert!(assignment.verifications.is_none());
}

#[test]
fn test_sentence_compared_identity_is_the_triple() {
    let mut set = HashSet::new();
    set.insert(SentenceCompared::new("a", "b", 0.97));
    set.insert(SentenceCompared::new("a", "b", 0.97));
    set.insert(SentenceCompared::new("a", "b", 0.98));

    assert_eq!(set.len(), 2);
}

#[test]
fn test_noteworthy_comparisons() {
    let present = Assignment::new(vec!["x".into()]).with_author("Ana");

    let clean = AssignmentCompared::clean(&present);
    assert!(!clean.is_noteworthy());

    let exact = AssignmentCompared {
        plagiarism: 1.0,
        ..AssignmentCompared::clean(&present)
    };
    assert!(exact.is_noteworthy());

    let with_hits = AssignmentCompared {
        similarities: vec![SentenceCompared::new("a", "b", 0.96)],
        ..AssignmentCompared::clean(&present)
    };
    assert!(with_hits.is_noteworthy());
}

#[test]
fn test_unknown_verified_serializes_id_and_author_only() {
    let verified = AssignmentVerified::unknown(Uuid::new_v4(), UNKNOWN_AUTHOR);
    let value = serde_json::to_value(&verified).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert!(object.contains_key("id"));
    assert!(object.contains_key("author"));
}

#[test]
fn test_verified_from_assignment_round_trips_records() {
    let compared = AssignmentCompared {
        id: Uuid::new_v4(),
        author: "Ana".into(),
        plagiarism: 0.4,
        similarities: vec![SentenceCompared::new("stored", "submitted", 0.99)],
    };

    let mut assignment = sample_assignment();
    assignment.verifications = Some(vec![compared.clone().into()]);

    let verified = AssignmentVerified::from_assignment(&assignment);

    assert_eq!(verified.title.as_deref(), Some("title"));
    assert_eq!(verified.similarities, vec![compared]);
    assert_eq!(verified.max_plagiarism(), Some(0.4));
}

#[test]
fn test_stored_view() {
    let assignment = sample_assignment().with_topic(Topic::Innovation);
    let stored = AssignmentStored::from(&assignment);

    assert_eq!(stored.id, assignment.id);
    assert_eq!(stored.topic, Topic::Innovation);
    assert_eq!(stored.content, assignment.content);
}
