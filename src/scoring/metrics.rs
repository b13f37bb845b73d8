//! Metric names and the scored-episode container.
//!
//! Key strings match the benchmark's evaluation tables so scored
//! episodes aggregate across games without renaming.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Episode ended without a valid outcome.
pub const METRIC_ABORTED: &str = "Aborted";
/// The guesser identified the target.
pub const METRIC_SUCCESS: &str = "Success";
/// The guesser failed to identify the target.
pub const METRIC_LOSE: &str = "Lose";
/// Logical requests issued.
pub const METRIC_REQUEST_COUNT: &str = "Request Count";
/// Requests that violated a rule.
pub const METRIC_REQUEST_COUNT_VIOLATED: &str = "Violated Request Count";
/// Requests that parsed cleanly.
pub const METRIC_REQUEST_COUNT_PARSED: &str = "Parsed Request Count";
/// Parsed / total requests.
pub const METRIC_REQUEST_SUCCESS: &str = "Request Success Ratio";
/// The episode-level benchmark score.
pub const BENCH_SCORE: &str = "Main Score";

/// How close a winning episode came to the level's lower bound.
pub const METRIC_SPEED: &str = "Speed";
/// Turn-level: whether the guesser has won by this turn.
pub const METRIC_ACCURACY: &str = "Accuracy";
/// Consecutive identical guesser turns.
pub const METRIC_REPETITION_GUESSER: &str = "Repetition-Guesser";
/// Consecutive identical answerer turns.
pub const METRIC_REPETITION_ANSWERER: &str = "Repetition-Answerer";

/// Per-role, per-kind violation counts.
pub const METRIC_INVALID_FORMAT_GUESSER: &str = "Invalid format guesser response";
pub const METRIC_INVALID_FORMAT_ANSWERER: &str = "Invalid format answerer response";
pub const METRIC_INVALID_CONTENT_GUESSER: &str = "Invalid content guesser response";
pub const METRIC_INVALID_CONTENT_ANSWERER: &str = "Invalid content answerer response";

/// Scores derived from one finished episode.
///
/// Undefined values (bench score of an aborted episode) are recorded as
/// `f64::NAN`, distinguishing "no valid outcome" from a valid zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Per-turn scores, indexed by turn.
    pub turns: Vec<FxHashMap<String, f64>>,

    /// Episode-level scores.
    pub episode: FxHashMap<String, f64>,
}

impl Metrics {
    /// Record a turn-level score, growing the turn table as needed.
    pub fn log_turn_score(&mut self, turn_idx: usize, name: &str, value: f64) {
        if self.turns.len() <= turn_idx {
            self.turns.resize_with(turn_idx + 1, FxHashMap::default);
        }
        self.turns[turn_idx].insert(name.to_string(), value);
    }

    /// Record an episode-level score.
    pub fn log_episode_score(&mut self, name: &str, value: f64) {
        self.episode.insert(name.to_string(), value);
    }

    /// Look up an episode-level score.
    #[must_use]
    pub fn episode_score(&self, name: &str) -> Option<f64> {
        self.episode.get(name).copied()
    }

    /// Whether the episode was aborted.
    #[must_use]
    pub fn aborted(&self) -> bool {
        self.episode_score(METRIC_ABORTED) == Some(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_table_grows() {
        let mut m = Metrics::default();
        m.log_turn_score(2, METRIC_REQUEST_COUNT, 1.0);

        assert_eq!(m.turns.len(), 3);
        assert!(m.turns[0].is_empty());
        assert_eq!(m.turns[2][METRIC_REQUEST_COUNT], 1.0);
    }

    #[test]
    fn test_episode_scores() {
        let mut m = Metrics::default();
        m.log_episode_score(METRIC_ABORTED, 1.0);
        m.log_episode_score(BENCH_SCORE, f64::NAN);

        assert!(m.aborted());
        assert!(m.episode_score(BENCH_SCORE).unwrap().is_nan());
        assert_eq!(m.episode_score(METRIC_SUCCESS), None);
    }
}
