//! Text normalization used for guess comparison.
//!
//! Utterances are never mutated; normalization produces a fresh string
//! used only when comparing a guess against the target word.

/// Strip ASCII punctuation from a string, keeping everything else.
#[must_use]
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Normalize a word for guess comparison: lower-case, strip punctuation,
/// trim surrounding whitespace.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    remove_punctuation(&word.to_lowercase()).trim().to_string()
}
