//! The response-generation seam.
//!
//! A [`Player`] produces one utterance per request, given the dialogue
//! history so far. The engine treats the generator as opaque: backend
//! failures propagate out as [`BackendError`] and are never retried by
//! the core — only rule violations take the reprompt path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response generation failed. Not a rule violation; surfaces to the
/// caller untouched.
#[derive(Debug, Clone, Error)]
#[error("backend failure: {message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Who produced a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Delivered to the player (prompts, questions, answers, reprompts).
    User,
    /// Produced by the player.
    Assistant,
}

/// One entry of a player's dialogue history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Produces utterances for one role.
pub trait Player {
    /// Return the next utterance given the dialogue so far.
    fn respond(&mut self, history: &[Message], turn_idx: u32) -> Result<String, BackendError>;
}

/// Deterministic player replaying a fixed script, keyed by turn index.
///
/// Reprompt retries within a turn advance through the script too, so a
/// script can exercise violation-then-recovery sequences.
pub struct ScriptedPlayer {
    script: Vec<String>,
    cursor: usize,
}

impl ScriptedPlayer {
    /// Create a player that replays `script` in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// A player that repeats one utterance forever.
    #[must_use]
    pub fn repeating(utterance: impl Into<String>) -> Self {
        Self {
            script: vec![utterance.into()],
            cursor: 0,
        }
    }
}

impl Player for ScriptedPlayer {
    fn respond(&mut self, _history: &[Message], _turn_idx: u32) -> Result<String, BackendError> {
        if self.script.is_empty() {
            return Err(BackendError::new("scripted player has no utterances"));
        }
        let utterance = self.script[self.cursor.min(self.script.len() - 1)].clone();
        if self.cursor < self.script.len() - 1 {
            self.cursor += 1;
        }
        Ok(utterance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_player_advances() {
        let mut player = ScriptedPlayer::new(["QUESTION: Is it alive?", "GUESS: cat"]);

        assert_eq!(player.respond(&[], 0).unwrap(), "QUESTION: Is it alive?");
        assert_eq!(player.respond(&[], 1).unwrap(), "GUESS: cat");
        // Script exhausted: the last utterance repeats.
        assert_eq!(player.respond(&[], 2).unwrap(), "GUESS: cat");
    }

    #[test]
    fn test_repeating_player() {
        let mut player = ScriptedPlayer::repeating("ANSWER: no");
        for turn in 0..5 {
            assert_eq!(player.respond(&[], turn).unwrap(), "ANSWER: no");
        }
    }

    #[test]
    fn test_empty_script_is_backend_error() {
        let mut player = ScriptedPlayer::new(Vec::<String>::new());
        assert!(player.respond(&[], 0).is_err());
    }

    #[test]
    fn test_message_constructors() {
        let m = Message::user("hello");
        assert_eq!(m.role, ChatRole::User);
        assert_eq!(m.content, "hello");
    }
}
