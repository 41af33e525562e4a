use super::*;
use crate::nlp::EntityRecognizer;
use crate::nlp::mock::MockEntityExtractor;

fn inferencer(extractor: MockEntityExtractor) -> AuthorInferencer {
    AuthorInferencer::new(Arc::new(extractor), AuthorConfig::default())
}

#[test]
fn test_staff_name_with_titles_is_excluded() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["Prof. Ingeniero Hernán Borré"]));
    assert_eq!(
        authors.infer_one("Prof. Ingeniero Hernán Borré").unwrap(),
        UNKNOWN_AUTHOR
    );
}

#[test]
fn test_first_surviving_candidate_wins() {
    let authors = inferencer(MockEntityExtractor::persons(vec![
        "Lic. Marta Suárez",
        "juan PÉREZ",
        "Ana Gómez",
    ]));
    assert_eq!(authors.infer_one("cover page").unwrap(), "Juan Pérez");
}

#[test]
fn test_exclusion_is_substring_not_prefix() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["Carla Bracho"]));
    assert_eq!(authors.infer_one("text").unwrap(), UNKNOWN_AUTHOR);
}

#[test]
fn test_uppercase_excluded_name_is_excluded() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["HERNÁN BORRÉ", "Ana Gómez"]));
    assert_eq!(authors.infer_one("text").unwrap(), "Ana Gómez");
}

#[test]
fn test_exclusion_does_not_match_inside_lowercase_letters() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["Sandra Núñez"]));
    assert_eq!(authors.infer_one("text").unwrap(), "Sandra Núñez");
}

#[test]
fn test_uppercase_staff_name_on_cover_page_is_excluded() {
    let authors = AuthorInferencer::new(
        Arc::new(EntityRecognizer::heuristic()),
        AuthorConfig::default(),
    );

    assert_eq!(
        authors
            .infer_one("PROF. INGENIERO HERNÁN BORRÉ\nTrabajo práctico de economía")
            .unwrap(),
        UNKNOWN_AUTHOR
    );
}

#[test]
fn test_noise_tokens_are_stripped() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["Alumno: Carlos Ruiz Legajo"]));
    assert_eq!(authors.infer_one("text").unwrap(), "Carlos Ruiz");
}

#[test]
fn test_only_noise_is_unknown() {
    let authors = inferencer(MockEntityExtractor::persons(vec!["Alumno Legajo"]));
    assert_eq!(authors.infer_one("text").unwrap(), UNKNOWN_AUTHOR);
}

#[test]
fn test_no_entities_is_unknown() {
    let authors = inferencer(MockEntityExtractor::empty());
    assert_eq!(authors.infer_one("nothing here").unwrap(), UNKNOWN_AUTHOR);
    assert_eq!(authors.infer::<&str>(&[]).unwrap(), UNKNOWN_AUTHOR);
}

#[test]
fn test_first_section_with_a_name_wins() {
    let authors = inferencer(MockEntityExtractor::known_persons(vec![
        "Maximiliano Bracho",
        "Sofía Díaz",
        "Pedro Núñez",
    ]));

    let sections = [
        "Docente: Maximiliano Bracho",
        "Presentado por Sofía Díaz",
        "Revisado por Pedro Núñez",
    ];

    assert_eq!(authors.infer(&sections).unwrap(), "Sofía Díaz");
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("hernán  BORRÉ"), "Hernán Borré");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_custom_config_validation() {
    assert!(AuthorConfig::default().validate().is_ok());
    assert!(
        AuthorConfig::default()
            .with_excluded_names(vec![" ".to_string()])
            .validate()
            .is_err()
    );
}
