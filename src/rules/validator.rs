//! Utterance classification against role-specific format and content rules.
//!
//! `classify` is a pure function: same inputs, same verdict, regardless
//! of turn index. Format errors and content errors are data on the
//! returned [`Verdict`], never `Err` values.

use serde::{Deserialize, Serialize};

use crate::core::text::normalize_word;
use crate::core::Role;

use super::patterns::{check_question, ContentRule};

/// Literal prefix introducing a question.
pub const QUESTION_PREFIX: &str = "QUESTION: ";

/// Literal prefix introducing the terminal guess.
pub const GUESS_PREFIX: &str = "GUESS: ";

/// The closed set of accepted answerer utterances.
pub const ACCEPTED_ANSWERS: [&str; 6] = [
    "ANSWER: yes",
    "ANSWER: no",
    "ANSWER: Yes.",
    "ANSWER: Yes",
    "ANSWER: No.",
    "ANSWER: No",
];

/// Format-rule violations, per role grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatError {
    /// Guesser utterance began with neither `QUESTION: ` nor `GUESS: `.
    BadGuesserPrefix,
    /// More than one `QUESTION:` token in a single turn.
    MultipleQuestions,
    /// Text after the terminal question mark.
    TextAfterQuestionMark,
    /// A guess that reduces to more than one token.
    MultiWordGuess,
    /// Answerer utterance outside the accepted literal set.
    BadAnswer,
}

impl FormatError {
    /// Human-readable rejection message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            FormatError::BadGuesserPrefix => {
                "Invalid format. Guesser must use the form 'QUESTION: ' or 'GUESS: '."
            }
            FormatError::MultipleQuestions => "Multiple questions detected in a single turn.",
            FormatError::TextAfterQuestionMark => {
                "Invalid format. Question must stop after the question mark."
            }
            FormatError::MultiWordGuess => "Invalid format. Guess must be a single word.",
            FormatError::BadAnswer => {
                "Invalid format. Answerer must reply with 'ANSWER: yes' or 'ANSWER: no'."
            }
        }
    }
}

/// A well-formed utterance, by kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsedUtterance {
    /// A question with the prefix stripped.
    Question { text: String },
    /// A normalized single-word guess and whether it matched the target.
    Guess { word: String, correct: bool },
    /// An accepted answer literal.
    Answer { text: String },
}

/// Classification result for a single utterance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The utterance matched the role's grammar.
    pub format_valid: bool,
    /// No forbidden-content category matched (questions only).
    pub content_valid: bool,
    /// The parsed utterance, present when the format was valid.
    pub parsed: Option<ParsedUtterance>,
    /// Format violations found, in rule order.
    pub format_errors: Vec<FormatError>,
    /// Content violations found, in category order.
    pub content_errors: Vec<ContentRule>,
}

impl Verdict {
    fn valid(parsed: ParsedUtterance) -> Self {
        Self {
            format_valid: true,
            content_valid: true,
            parsed: Some(parsed),
            format_errors: Vec::new(),
            content_errors: Vec::new(),
        }
    }

    fn format_invalid(error: FormatError) -> Self {
        Self {
            format_valid: false,
            content_valid: true,
            parsed: None,
            format_errors: vec![error],
            content_errors: Vec::new(),
        }
    }

    fn content_invalid(text: String, errors: Vec<ContentRule>) -> Self {
        Self {
            format_valid: true,
            content_valid: false,
            parsed: Some(ParsedUtterance::Question { text }),
            format_errors: Vec::new(),
            content_errors: errors,
        }
    }

    /// Either rule family was violated.
    #[must_use]
    pub fn is_violation(&self) -> bool {
        !self.format_valid || !self.content_valid
    }
}

/// Classify one utterance against a role's rules.
///
/// The candidate list is part of the classification contract but no
/// current rule consults it; the target word is used only for the
/// normalized guess comparison.
#[must_use]
pub fn classify(
    role: Role,
    utterance: &str,
    _candidate_list: &[String],
    target_word: &str,
) -> Verdict {
    match role {
        Role::Guesser => classify_guesser(utterance, target_word),
        Role::Answerer => classify_answerer(utterance),
    }
}

fn classify_guesser(utterance: &str, target_word: &str) -> Verdict {
    if let Some(rest) = utterance.strip_prefix(QUESTION_PREFIX) {
        let question_text = rest.trim();

        if utterance.matches("QUESTION:").count() > 1 {
            return Verdict::format_invalid(FormatError::MultipleQuestions);
        }

        // Everything after the first question mark must be whitespace.
        if question_text.contains('?') {
            let parts: Vec<&str> = question_text.split('?').collect();
            if parts.len() > 2 || !parts[1].trim().is_empty() {
                return Verdict::format_invalid(FormatError::TextAfterQuestionMark);
            }
        }

        let violations = check_question(question_text);
        if violations.is_empty() {
            Verdict::valid(ParsedUtterance::Question {
                text: question_text.to_string(),
            })
        } else {
            Verdict::content_invalid(question_text.to_string(), violations)
        }
    } else if let Some(rest) = utterance.strip_prefix(GUESS_PREFIX) {
        let guess_word = normalize_word(rest);

        if guess_word.split_whitespace().count() > 1 {
            return Verdict::format_invalid(FormatError::MultiWordGuess);
        }

        let correct = guess_word == normalize_word(target_word);
        Verdict::valid(ParsedUtterance::Guess {
            word: guess_word,
            correct,
        })
    } else {
        Verdict::format_invalid(FormatError::BadGuesserPrefix)
    }
}

fn classify_answerer(utterance: &str) -> Verdict {
    if ACCEPTED_ANSWERS.contains(&utterance) {
        Verdict::valid(ParsedUtterance::Answer {
            text: utterance.to_string(),
        })
    } else {
        Verdict::format_invalid(FormatError::BadAnswer)
    }
}
