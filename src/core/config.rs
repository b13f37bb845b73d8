//! Experiment configuration: turn budget, reprompt budget, difficulty level.
//!
//! Configuration is an immutable value passed into the coordinator and the
//! scorer at construction. There is no module-level mutable state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default retry budget per role for rule violations.
pub const DEFAULT_REPROMPT_LIMIT: u32 = 1;

/// Bench-score penalty per guesser reprompt.
pub const REPROMPT_PENALTY: f64 = 10.0;

/// Categories represented in a Level 1 candidate list.
pub const LEVEL_1_NUM_CATEGORIES: u32 = 4;

/// Distinguishing features represented in a Level 3 candidate list.
pub const LEVEL_3_NUM_FEATURES: u32 = 4;

/// Configuration errors raised at setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The level-name string matched no known difficulty level.
    #[error("unknown level name: {0:?}")]
    UnknownLevel(String),

    /// The target word is not a member of the candidate list.
    #[error("target word {0:?} is not in the candidate list")]
    TargetNotInCandidates(String),

    /// The turn budget must allow at least one turn.
    #[error("max_turns must be at least 1, got {0}")]
    ZeroMaxTurns(u32),
}

/// Difficulty level of an experiment.
///
/// Parsed from the opaque level-name string carried in experiment
/// configuration (`"Level_1"`, `"Abs_Level_2"`, ...). The level decides
/// the lower bound used by the speed score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Closely related words: two each from paired subcategories.
    One,
    /// Four words from each of two subcategories.
    Two,
    /// One word per subcategory, all distinct.
    Three,
}

impl Level {
    /// Parse a level from its experiment-name string.
    ///
    /// Accepts both the plain (`"Level_1"`) and abstract (`"Abs_Level_1"`)
    /// spellings, case-insensitively.
    pub fn from_name(name: &str) -> Result<Level, ConfigError> {
        let lower = name.to_ascii_lowercase();
        let trimmed = lower.strip_prefix("abs_").unwrap_or(&lower);
        match trimmed {
            "level_1" => Ok(Level::One),
            "level_2" => Ok(Level::Two),
            "level_3" => Ok(Level::Three),
            _ => Err(ConfigError::UnknownLevel(name.to_string())),
        }
    }

    /// Minimum turn count a perfect guesser needs at this level.
    ///
    /// Level 1: one question per category plus the guess.
    /// Level 2: binary search over the list plus the guess.
    /// Level 3: one question per feature plus the guess.
    #[must_use]
    pub fn lower_bound_turns(self, max_turns: u32) -> f64 {
        match self {
            Level::One => f64::from(LEVEL_1_NUM_CATEGORIES) + 1.0,
            Level::Two => f64::from(max_turns).log2() + 1.0,
            Level::Three => f64::from(LEVEL_3_NUM_FEATURES) + 1.0,
        }
    }
}

/// Immutable per-episode experiment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Maximum number of logical turns before the episode is cut off.
    pub max_turns: u32,

    /// Retry budget per role for rule violations.
    pub reprompt_limit: u32,

    /// Difficulty level of the candidate list.
    pub level: Level,
}

impl ExperimentConfig {
    /// Create a configuration with the default reprompt limit.
    pub fn new(max_turns: u32, level: Level) -> Result<Self, ConfigError> {
        Self::with_reprompt_limit(max_turns, DEFAULT_REPROMPT_LIMIT, level)
    }

    /// Create a configuration with an explicit reprompt limit.
    pub fn with_reprompt_limit(
        max_turns: u32,
        reprompt_limit: u32,
        level: Level,
    ) -> Result<Self, ConfigError> {
        if max_turns == 0 {
            return Err(ConfigError::ZeroMaxTurns(max_turns));
        }
        Ok(Self {
            max_turns,
            reprompt_limit,
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_name() {
        assert_eq!(Level::from_name("Level_1"), Ok(Level::One));
        assert_eq!(Level::from_name("Level_2"), Ok(Level::Two));
        assert_eq!(Level::from_name("Level_3"), Ok(Level::Three));
        assert_eq!(Level::from_name("Abs_Level_1"), Ok(Level::One));
        assert_eq!(Level::from_name("abs_level_3"), Ok(Level::Three));
    }

    #[test]
    fn test_level_from_name_unknown() {
        assert_eq!(
            Level::from_name("Level_4"),
            Err(ConfigError::UnknownLevel("Level_4".to_string()))
        );
        assert!(Level::from_name("").is_err());
    }

    #[test]
    fn test_lower_bound_turns_per_level() {
        assert_eq!(Level::One.lower_bound_turns(10), 5.0);
        assert_eq!(Level::Three.lower_bound_turns(10), 5.0);

        // log2(16) + 1 = 5
        assert_eq!(Level::Two.lower_bound_turns(16), 5.0);
    }

    #[test]
    fn test_config_defaults() {
        let config = ExperimentConfig::new(10, Level::One).unwrap();
        assert_eq!(config.reprompt_limit, DEFAULT_REPROMPT_LIMIT);
        assert_eq!(config.max_turns, 10);
    }

    #[test]
    fn test_config_rejects_zero_turns() {
        assert_eq!(
            ExperimentConfig::new(0, Level::Two),
            Err(ConfigError::ZeroMaxTurns(0))
        );
    }
}
