use super::*;

#[test]
fn test_lexical_identical_texts_score_one() {
    let sim = SentenceSimilarity::lexical();
    let text = "The digital economy reshapes traditional markets.";
    assert_eq!(sim.similarity(text, text).unwrap(), 1.0);
}

#[test]
fn test_lexical_disjoint_texts_score_zero() {
    let sim = SentenceSimilarity::lexical();
    let score = sim
        .similarity("Blockchain ledgers are append only.", "Tourism depends on memories")
        .unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn test_lexical_ignores_case_and_punctuation() {
    let score = lexical::similarity("Innovation drives growth!", "innovation, drives growth");
    assert!(score > 0.999, "score was {score}");
}

#[test]
fn test_lexical_partial_overlap_is_between_bounds() {
    let score = lexical::similarity(
        "Companies sell experiences rather than products",
        "Companies sell products online",
    );
    assert!(score > 0.0 && score < 1.0, "score was {score}");
}

#[test]
fn test_lexical_empty_text_scores_zero() {
    assert_eq!(lexical::similarity("", "anything here"), 0.0);
    assert_eq!(lexical::similarity("...", "!!!"), 0.0);
}

#[test]
fn test_load_without_model_path_uses_lexical() {
    let sim = SentenceSimilarity::load(SimilarityConfig::lexical()).unwrap();
    assert!(!sim.is_model_loaded());
    assert!(sim.embed("text").is_err());
}

#[test]
fn test_load_missing_model_path_fails() {
    let err = SentenceSimilarity::load(SimilarityConfig::new("/nonexistent/encoder")).unwrap_err();
    assert!(matches!(err, NlpError::ModelNotFound { .. }));
}

#[test]
fn test_load_incomplete_model_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{}").unwrap();

    let err = SentenceSimilarity::load(SimilarityConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, NlpError::ModelLoadFailed { .. }));
}

#[test]
fn test_config_validation() {
    assert!(SimilarityConfig::default().validate().is_ok());
    assert!(
        SimilarityConfig::default()
            .with_max_seq_len(0)
            .validate()
            .is_err()
    );
    assert!(SimilarityConfig::new("").validate().is_err());
}

#[test]
fn test_cosine_clamps_negative_scores() {
    assert_eq!(cosine(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    assert_eq!(cosine(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
    assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_normalize_unit_length() {
    let v = normalize(vec![3.0, 4.0]);
    assert!((v[0] - 0.6).abs() < 1e-6);
    assert!((v[1] - 0.8).abs() < 1e-6);
    assert_eq!(normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
}
