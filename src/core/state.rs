//! Per-episode mutable game state.
//!
//! `GameState` is owned exclusively by the coordinator for the episode's
//! lifetime. It records the validation flags, the guess word once one is
//! parsed, and each role's consumed reprompt budget.
//!
//! ## Invariants
//!
//! - `correct_guess` and `incorrect_guess` are never both true; once
//!   either is set the episode is terminal.
//! - `current_turn` never decreases.
//! - `reprompt_count[role]` is monotonically non-decreasing.

use serde::{Deserialize, Serialize};

use super::role::{Role, RoleMap};

/// Mutable per-episode record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// The hidden word; immutable after setup.
    target_word: String,

    /// Candidate words, fixed for the episode.
    candidate_list: Vec<String>,

    /// Current logical turn, starting at 0. Advanced by the driver.
    current_turn: u32,

    /// The guess word, set once a GUESS utterance is parsed.
    pub guess_word: Option<String>,

    /// Set while the last validated utterance had a format violation.
    pub invalid_format: bool,

    /// Set while the last validated utterance had a content violation.
    pub invalid_content: bool,

    /// The parsed guess matched the target. Terminal.
    correct_guess: bool,

    /// The parsed guess missed the target. Terminal.
    incorrect_guess: bool,

    /// Reprompts consumed so far, per role.
    reprompt_count: RoleMap<u32>,
}

impl GameState {
    /// Create state for a fresh episode.
    #[must_use]
    pub fn new(target_word: impl Into<String>, candidate_list: Vec<String>) -> Self {
        Self {
            target_word: target_word.into(),
            candidate_list,
            current_turn: 0,
            guess_word: None,
            invalid_format: false,
            invalid_content: false,
            correct_guess: false,
            incorrect_guess: false,
            reprompt_count: RoleMap::default(),
        }
    }

    /// The hidden target word.
    #[must_use]
    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    /// The candidate list.
    #[must_use]
    pub fn candidate_list(&self) -> &[String] {
        &self.candidate_list
    }

    /// Current logical turn index.
    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Advance to the next logical turn.
    pub fn advance_turn(&mut self) {
        self.current_turn += 1;
    }

    /// Reset the validation flags. Called at the start of each validation.
    pub fn reset_flags(&mut self) {
        self.invalid_format = false;
        self.invalid_content = false;
    }

    /// Record the outcome of a well-formed guess.
    ///
    /// May be called at most once per episode.
    pub fn record_guess(&mut self, guess_word: String, correct: bool) {
        debug_assert!(
            !self.guess_concluded(),
            "a guess outcome was already recorded"
        );
        self.guess_word = Some(guess_word);
        if correct {
            self.correct_guess = true;
        } else {
            self.incorrect_guess = true;
        }
    }

    /// The guess matched the target.
    #[must_use]
    pub fn correct_guess(&self) -> bool {
        self.correct_guess
    }

    /// The guess missed the target.
    #[must_use]
    pub fn incorrect_guess(&self) -> bool {
        self.incorrect_guess
    }

    /// A guess outcome (either way) has been recorded.
    #[must_use]
    pub fn guess_concluded(&self) -> bool {
        self.correct_guess || self.incorrect_guess
    }

    /// Reprompts consumed by a role so far.
    #[must_use]
    pub fn reprompt_count(&self, role: Role) -> u32 {
        self.reprompt_count[role]
    }

    /// Consume one unit of a role's reprompt budget.
    pub fn consume_reprompt(&mut self, role: Role) {
        self.reprompt_count[role] += 1;
    }

    /// Either validation flag is currently raised.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        self.invalid_format || self.invalid_content
    }
}
