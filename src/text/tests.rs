use super::*;

#[test]
fn test_contains_alphanumeric() {
    assert!(contains_letters_or_numbers("foo123"));
    assert!(contains_letters_or_numbers("foo123!@#%"));
    assert!(contains_letters_or_numbers("año"));
}

#[test]
fn test_contains_non_alphanumeric() {
    assert!(!contains_letters_or_numbers("!@#%"));
    assert!(!contains_letters_or_numbers("  \n "));
}

#[test]
fn test_separate_lines_stay_separate() {
    let sentences = normalize_block("This is a sentence.\nThis is another sentence.");

    assert_eq!(
        sentences,
        vec!["This is a sentence.", "This is another sentence."]
    );
}

#[test]
fn test_lowercase_line_continues_previous_sentence() {
    let sentences = normalize_block("This is a sentence\nthat is continued into another line.");

    assert_eq!(
        sentences,
        vec!["This is a sentence that is continued into another line."]
    );
}

#[test]
fn test_uppercase_line_after_continuation_starts_new_sentence() {
    let raw = "This is a sentence\nthat is continued into another line.\nHowever, this uses another line.";

    assert_eq!(
        normalize_block(raw),
        vec![
            "This is a sentence that is continued into another line.",
            "However, this uses another line.",
        ]
    );
}

#[test]
fn test_blank_lines_are_dropped() {
    let raw = "This is a line.\n  \nThis is another line.";

    assert_eq!(
        normalize_block(raw),
        vec!["This is a line.", "This is another line."]
    );
}

#[test]
fn test_sentences_on_one_line_are_segmented() {
    let raw = "The market grew quickly. Firms adapted their strategy.";

    assert_eq!(
        normalize_block(raw),
        vec!["The market grew quickly.", "Firms adapted their strategy."]
    );
}

#[test]
fn test_punctuation_only_fragments_are_dropped() {
    assert!(normalize_block("...\n---\n!!").is_empty());
}

#[test]
fn test_empty_input_yields_no_sentences() {
    assert!(normalize_block("").is_empty());
    assert!(normalize_blocks::<&str>(&[]).is_empty());
}

#[test]
fn test_no_sentence_contains_a_newline() {
    let raw = "Intro line\ncontinues here\nand here.\nNext Sentence starts\nbut wraps.";

    for sentence in normalize_block(raw) {
        assert!(!sentence.contains('\n'), "newline in {sentence:?}");
    }
}

#[test]
fn test_bullets_and_control_characters_are_stripped() {
    let raw = "• First item of the list\n\u{F0B7} Second item\u{0007} here\n- third item";

    assert_eq!(
        normalize_block(raw),
        vec!["First item of the list", "Second item here", "third item"]
    );
}

#[test]
fn test_strip_glyphs_keeps_newlines() {
    assert_eq!(strip_glyphs("a\tb\r\nc▪"), "a b\nc");
}

#[test]
fn test_join_lines_without_previous_line() {
    assert_eq!(join_lines("lowercase start"), vec!["lowercase start"]);
}

#[test]
fn test_normalize_blocks_preserves_block_order() {
    let blocks = ["Page one text here.", "Page two text here."];

    assert_eq!(
        normalize_blocks(&blocks),
        vec!["Page one text here.", "Page two text here."]
    );
}
