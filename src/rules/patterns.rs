//! Forbidden-question patterns.
//!
//! Five semantically forbidden question categories, each matched by a
//! regex compiled once. Matching is case-insensitive and runs on the
//! question text with the `QUESTION:` prefix already stripped.
//!
//! The quoted direct-guess pattern is a two-branch alternation because
//! the regex crate does not support backreferences.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Asks about a specific letter or the letter at an ordinal position.
    static ref LETTER_BASED: Regex = Regex::new(
        r"(?i)(does the target word (start with the letter|contain the letter)|does the target word have the letter\s*[a-z]|is the (first|second|third|fourth|fifth) letter of the target word [a-z])"
    ).unwrap();

    /// A disguised direct guess in quoted form.
    static ref DIRECT_GUESS: Regex = Regex::new(
        r#"(?i)^is the target word\s*('[^'"]+?'|"[^'"]+?")\s*\?"#
    ).unwrap();

    /// Asks about the word's length in letters.
    static ref WORD_LENGTH: Regex = Regex::new(
        r"(?i)does the target word (have|contain) (more|less|exactly) \d+ (letters|letter)"
    ).unwrap();

    /// Asks about the syllable count.
    static ref SYLLABLE_COUNT: Regex = Regex::new(
        r"(?i)does the target word (have|contain) (more than|less than|exactly) (one|two|three|four|five|six|seven|eight|nine|ten|\d+) (syllable|syllables)"
    ).unwrap();

    /// Asks about the grammatical part of speech.
    static ref PART_OF_SPEECH: Regex = Regex::new(
        r"(?i)^is the target word (a|an)\s+(noun|verb|adjective|adverb|pronoun|preposition|conjunction|interjection)\s*\?"
    ).unwrap();
}

/// A forbidden question category. Codes are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentRule {
    /// Specific letters or letter positions.
    LetterReference,
    /// A guess smuggled in without the `GUESS:` format.
    DisguisedGuess,
    /// Length of the target word in letters.
    WordLength,
    /// Number of syllables.
    SyllableCount,
    /// Part of speech of the target word.
    PartOfSpeech,
}

impl ContentRule {
    /// Stable numeric error code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            ContentRule::LetterReference => 1,
            ContentRule::DisguisedGuess => 2,
            ContentRule::WordLength => 3,
            ContentRule::SyllableCount => 4,
            ContentRule::PartOfSpeech => 5,
        }
    }

    /// Human-readable rejection message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            ContentRule::LetterReference => {
                "Invalid question. Asking about specific letters or their positions is not allowed."
            }
            ContentRule::DisguisedGuess => {
                "Invalid question. Guessing without 'GUESS:' format is not allowed."
            }
            ContentRule::WordLength => {
                "Invalid question. Asking about the length of the target word is not allowed."
            }
            ContentRule::SyllableCount => {
                "Invalid question. Asking about the number of syllables is not allowed."
            }
            ContentRule::PartOfSpeech => {
                "Invalid question. Asking about the part of speech (POS) of the target word is not allowed."
            }
        }
    }
}

/// Check a question text against every forbidden category.
///
/// Returns all matching categories; multiple categories may match the
/// same question, each recorded independently.
#[must_use]
pub fn check_question(question_text: &str) -> Vec<ContentRule> {
    let text = question_text.trim().to_lowercase();
    let mut violations = Vec::new();

    if LETTER_BASED.is_match(&text) {
        violations.push(ContentRule::LetterReference);
    }
    if DIRECT_GUESS.is_match(&text) {
        violations.push(ContentRule::DisguisedGuess);
    }
    if WORD_LENGTH.is_match(&text) {
        violations.push(ContentRule::WordLength);
    }
    if SYLLABLE_COUNT.is_match(&text) {
        violations.push(ContentRule::SyllableCount);
    }
    if PART_OF_SPEECH.is_match(&text) {
        violations.push(ContentRule::PartOfSpeech);
    }

    violations
}
