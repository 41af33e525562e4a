use std::collections::HashMap;

fn term_frequencies(text: &str) -> HashMap<String, f32> {
    let mut counts: HashMap<String, f32> = HashMap::new();
    for term in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *counts.entry(term.to_lowercase()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of the two texts' term-frequency vectors, in `[0, 1]`.
///
/// Case and punctuation are ignored. Texts with no terms score `0.0`.
pub fn similarity(a: &str, b: &str) -> f32 {
    let left = term_frequencies(a);
    let right = term_frequencies(b);

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let dot: f32 = left
        .iter()
        .filter_map(|(term, count)| right.get(term).map(|other| count * other))
        .sum();

    let norm = |tf: &HashMap<String, f32>| tf.values().map(|c| c * c).sum::<f32>().sqrt();
    let denominator = norm(&left) * norm(&right);

    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(0.0, 1.0)
}
