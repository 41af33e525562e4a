use crate::nlp::Entity;

/// Lowercase particles allowed inside a name ("Juan de la Cruz").
const NAME_PARTICLES: &[&str] = &["de", "del", "la", "las", "los", "van", "von", "da", "di"];

fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_uppercase()
        && word.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && word
            .chars()
            .all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '.')
}

fn flush(run: &mut Vec<&str>, found: &mut Vec<Entity>) {
    while run
        .last()
        .is_some_and(|w| NAME_PARTICLES.contains(&w.to_lowercase().as_str()))
    {
        run.pop();
    }

    if run.len() >= 2 {
        found.push(Entity::person(run.join(" ")));
    }
    run.clear();
}

/// Finds person-like names: runs of two or more capitalized words on one line.
///
/// Lowercase particles may join two capitalized words. Trailing `,;:` and a final `.`
/// close the run (single-letter initials like `J.` are kept inside it).
pub fn extract_persons(text: &str) -> Vec<Entity> {
    let mut found = Vec::new();

    for line in text.lines() {
        let mut run: Vec<&str> = Vec::new();

        for raw in line.split_whitespace() {
            let closes = raw.ends_with([',', ';', ':', '!', '?'])
                || (raw.ends_with('.') && raw.chars().filter(|c| c.is_alphabetic()).count() > 1);
            let word = raw.trim_end_matches([',', ';', ':', '!', '?']);
            let word = if closes {
                word.trim_end_matches('.')
            } else {
                word
            };

            let is_initial = word.len() == 2
                && word.ends_with('.')
                && word.chars().next().is_some_and(char::is_uppercase);

            if is_name_word(word) || (is_initial && !run.is_empty()) {
                run.push(word);
            } else if !run.is_empty() && NAME_PARTICLES.contains(&word) {
                run.push(word);
                continue;
            } else {
                flush(&mut run, &mut found);
                continue;
            }

            if closes {
                flush(&mut run, &mut found);
            }
        }

        flush(&mut run, &mut found);
    }

    found
}
