//! Game instance: the hidden target and its candidate list.
//!
//! Instances arrive as JSON records of the form
//! `{"target_word": "...", "candidate_list": [...], "max_turns": N}`.
//! The candidate list is an ordered sequence of distinct words, fixed
//! for the episode; the target is guaranteed to be a member.

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// One playable episode setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstance {
    /// The hidden word the guesser must identify.
    pub target_word: String,

    /// Ordered, distinct candidate words, visible to the guesser.
    pub candidate_list: Vec<String>,

    /// Turn budget for this instance.
    pub max_turns: u32,
}

impl GameInstance {
    /// Create an instance, checking that the target is a candidate.
    pub fn new(
        target_word: impl Into<String>,
        candidate_list: Vec<String>,
        max_turns: u32,
    ) -> Result<Self, ConfigError> {
        let target_word = target_word.into();
        if !candidate_list.contains(&target_word) {
            return Err(ConfigError::TargetNotInCandidates(target_word));
        }
        Ok(Self {
            target_word,
            candidate_list,
            max_turns,
        })
    }

    /// Parse an instance from its JSON form, then validate membership.
    pub fn from_json(json: &str) -> Result<Self, InstanceParseError> {
        let parsed: GameInstance = serde_json::from_str(json)?;
        if !parsed.candidate_list.contains(&parsed.target_word) {
            return Err(InstanceParseError::Invalid(
                ConfigError::TargetNotInCandidates(parsed.target_word),
            ));
        }
        Ok(parsed)
    }

    /// Render the candidate list the way prompts show it.
    #[must_use]
    pub fn candidate_display(&self) -> String {
        format!("['{}']", self.candidate_list.join("', '"))
    }
}

/// Failure to read an instance from JSON.
#[derive(Debug, thiserror::Error)]
pub enum InstanceParseError {
    /// Malformed JSON or missing fields.
    #[error("malformed instance: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON that violates an instance invariant.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
