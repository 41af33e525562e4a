use blake3::Hasher;

/// Full BLAKE3 digest of a text; keys the sentence embedding cache.
#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// 64-bit fingerprint of an ordered list of sentences.
///
/// Sentence boundaries are part of the hash, so `["ab", "c"]` and `["a", "bc"]` differ.
/// Used to tag log lines and to spot byte-identical resubmissions; collisions only
/// matter at billions of documents.
pub fn content_fingerprint<S: AsRef<str>>(sentences: &[S]) -> u64 {
    let mut hasher = Hasher::new();
    for sentence in sentences {
        hasher.update(&(sentence.as_ref().len() as u64).to_le_bytes());
        hasher.update(sentence.as_ref().as_bytes());
    }

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hasher.finalize().as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
