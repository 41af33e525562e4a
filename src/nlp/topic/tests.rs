use super::*;

#[test]
fn test_topics_from_labels_maps_known_and_unknown() {
    let labels = ["Experience Economy", "EMERGING_SYSTEMS", "sports", "Innovation"];
    assert_eq!(
        topics_from_labels(&labels),
        vec![
            Topic::ExperienceEconomy,
            Topic::EmergingSystems,
            Topic::Undefined,
            Topic::Innovation,
        ]
    );
}

#[test]
fn test_load_optional_without_path_is_none() {
    assert!(TopicClassifier::load_optional(&TopicConfig::disabled()).is_none());
}

#[test]
fn test_load_optional_with_missing_model_is_none() {
    assert!(TopicClassifier::load_optional(&TopicConfig::new("/nonexistent/topic")).is_none());
}

#[test]
fn test_load_without_path_is_unavailable() {
    let err = TopicClassifier::load(&TopicConfig::disabled()).unwrap_err();
    assert!(matches!(err, NlpError::Unavailable { .. }));
}

#[test]
fn test_effective_max_seq_len() {
    assert_eq!(
        TopicConfig::disabled().effective_max_seq_len(),
        crate::constants::DEFAULT_MAX_SEQ_LEN
    );
    let mut config = TopicConfig::new("/models/topic");
    config.max_seq_len = 128;
    assert_eq!(config.effective_max_seq_len(), 128);
}
