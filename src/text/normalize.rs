use unicode_segmentation::UnicodeSegmentation;

/// Glyphs document exporters use for list items.
const BULLET_GLYPHS: &[char] = &[
    '•', '◦', '▪', '▫', '●', '○', '■', '□', '◆', '◇', '➢', '➤', '►', '▶', '✓', '✔', '∙', '·',
    '‣', '⁃',
];

/// Returns `true` if `text` has at least one letter or digit.
pub fn contains_letters_or_numbers(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

fn is_bullet(c: char) -> bool {
    BULLET_GLYPHS.contains(&c) || ('\u{E000}'..='\u{F8FF}').contains(&c)
}

/// Removes control characters and bullet glyphs, keeping line breaks.
///
/// Tabs and form feeds become spaces; carriage returns are dropped so `\r\n` input splits
/// like `\n` input.
pub fn strip_glyphs(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' | '\u{000C}' | '\u{000B}' | '\u{00A0}' => Some(' '),
            c if c.is_control() => None,
            c if is_bullet(c) => None,
            c => Some(c),
        })
        .collect()
}

/// Strips an ASCII list marker (`- `, `* `, `+ `) from the start of a trimmed line.
fn strip_list_marker(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*' | '+'), Some(next)) if next.is_whitespace() => Some(chars.as_str().trim()),
        _ => None,
    }
}

/// Re-joins physical lines into logical lines.
///
/// A line whose first character is lowercase continues the previous logical line; any
/// other line starts a new one. List items always start a new line. Blank lines are
/// dropped.
pub fn join_lines(text: &str) -> Vec<String> {
    let mut logical: Vec<String> = Vec::new();

    for raw in text.lines() {
        let mut line = raw.trim();
        let mut list_item = false;

        if let Some(rest) = strip_list_marker(line) {
            line = rest;
            list_item = true;
        }

        let Some(first) = line.chars().next() else {
            continue;
        };

        match logical.last_mut() {
            Some(current) if first.is_lowercase() && !list_item => {
                current.push(' ');
                current.push_str(line);
            }
            _ => logical.push(line.to_string()),
        }
    }

    logical
}

/// Splits one raw text block into clean sentences.
///
/// Steps: strip glyphs, re-join wrapped lines, segment each logical line on Unicode
/// sentence boundaries, trim, and drop fragments with no letters or digits. The result
/// never contains a newline inside a sentence.
pub fn normalize_block(raw: &str) -> Vec<String> {
    let cleaned = strip_glyphs(raw);

    join_lines(&cleaned)
        .iter()
        .flat_map(|line| {
            line.unicode_sentences()
                .map(collapse_whitespace)
                .collect::<Vec<_>>()
        })
        .filter(|sentence| !sentence.is_empty() && contains_letters_or_numbers(sentence))
        .collect()
}

/// Normalizes every block in order and flattens the result.
pub fn normalize_blocks<S: AsRef<str>>(blocks: &[S]) -> Vec<String> {
    blocks
        .iter()
        .flat_map(|block| normalize_block(block.as_ref()))
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
