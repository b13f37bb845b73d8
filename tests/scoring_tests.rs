//! Scoring tests over traces produced by real episodes.
//!
//! The unit tests in `scoring` use hand-built traces; these run full
//! episodes through `GameSession` first, so they also pin down the
//! trace shape the session emits.

use guess_what::core::{ExperimentConfig, GameInstance, Level};
use guess_what::players::ScriptedPlayer;
use guess_what::scoring::{
    score, BENCH_SCORE, METRIC_ABORTED, METRIC_INVALID_CONTENT_GUESSER,
    METRIC_INVALID_FORMAT_ANSWERER, METRIC_INVALID_FORMAT_GUESSER, METRIC_LOSE,
    METRIC_REQUEST_COUNT, METRIC_REQUEST_COUNT_PARSED, METRIC_REQUEST_COUNT_VIOLATED,
    METRIC_REQUEST_SUCCESS, METRIC_SPEED, METRIC_SUCCESS,
};
use guess_what::session::GameSession;
use guess_what::trace::Trace;

fn instance() -> GameInstance {
    GameInstance::new(
        "cat",
        vec!["cat".to_string(), "dog".to_string(), "car".to_string()],
        10,
    )
    .unwrap()
}

fn config() -> ExperimentConfig {
    ExperimentConfig::new(10, Level::One).unwrap()
}

fn run_and_score(guesser: ScriptedPlayer, answerer: ScriptedPlayer) -> guess_what::Metrics {
    let cfg = config();
    let session = GameSession::new(&instance(), cfg.clone(), Box::new(guesser), Box::new(answerer));
    let result = session.run().unwrap();
    score(&result.trace, &cfg)
}

/// A clean three-request win scores full speed and full bench score.
#[test]
fn test_clean_win_scores() {
    let m = run_and_score(
        ScriptedPlayer::new([
            "QUESTION: Is it an animal?",
            "QUESTION: Is it a pet?",
            "GUESS: cat",
        ]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(m.episode_score(METRIC_ABORTED), Some(0.0));
    assert_eq!(m.episode_score(METRIC_SUCCESS), Some(1.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_COUNT), Some(3.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_COUNT_PARSED), Some(3.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_COUNT_VIOLATED), Some(0.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_SUCCESS), Some(1.0));
    // 3 requests is under the Level 1 lower bound of 5.
    assert_eq!(m.episode_score(METRIC_SPEED), Some(100.0));
    assert_eq!(m.episode_score(BENCH_SCORE), Some(100.0));
}

/// A recovered violation costs one violated request and 10 bench points.
#[test]
fn test_recovered_violation_penalized() {
    let m = run_and_score(
        ScriptedPlayer::new([
            "QUESTION: Does the target word have the letter a?",
            "QUESTION: Is it an animal?",
            "GUESS: cat",
        ]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(m.episode_score(METRIC_ABORTED), Some(0.0));
    assert_eq!(m.episode_score(METRIC_SUCCESS), Some(1.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_COUNT), Some(2.0));
    assert_eq!(m.episode_score(METRIC_REQUEST_COUNT_VIOLATED), Some(1.0));
    assert_eq!(m.episode_score(METRIC_INVALID_CONTENT_GUESSER), Some(1.0));
    assert_eq!(m.episode_score(BENCH_SCORE), Some(90.0));
}

/// A wrong guess is a loss, not an abort.
#[test]
fn test_loss_scores() {
    let m = run_and_score(
        ScriptedPlayer::new(["GUESS: dog"]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(m.episode_score(METRIC_ABORTED), Some(0.0));
    assert_eq!(m.episode_score(METRIC_SUCCESS), Some(0.0));
    assert_eq!(m.episode_score(METRIC_LOSE), Some(1.0));
    assert_eq!(m.episode_score(BENCH_SCORE), Some(0.0));
}

/// An exhausted guesser budget aborts: NaN sentinels, per-role counts.
#[test]
fn test_guesser_abort_scores() {
    let m = run_and_score(
        ScriptedPlayer::repeating("it is a cat, surely"),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert!(m.aborted());
    assert!(m.episode_score(METRIC_SUCCESS).unwrap().is_nan());
    assert!(m.episode_score(METRIC_LOSE).unwrap().is_nan());
    assert!(m.episode_score(BENCH_SCORE).unwrap().is_nan());
    assert_eq!(m.episode_score(METRIC_INVALID_FORMAT_GUESSER), Some(2.0));
    assert_eq!(m.episode_score(METRIC_INVALID_FORMAT_ANSWERER), Some(0.0));
}

/// Answerer violations are attributed to the answerer.
#[test]
fn test_answerer_abort_attribution() {
    let m = run_and_score(
        ScriptedPlayer::repeating("QUESTION: Is it an animal?"),
        ScriptedPlayer::repeating("I would say yes"),
    );

    assert!(m.aborted());
    assert_eq!(m.episode_score(METRIC_INVALID_FORMAT_ANSWERER), Some(2.0));
    assert_eq!(m.episode_score(METRIC_INVALID_FORMAT_GUESSER), Some(0.0));
}

/// A trace survives JSON persistence and re-scores identically.
#[test]
fn test_rescoring_persisted_trace() {
    let cfg = config();
    let session = GameSession::new(
        &instance(),
        cfg.clone(),
        Box::new(ScriptedPlayer::new([
            "QUESTION: Is it an animal?",
            "GUESS: cat",
        ])),
        Box::new(ScriptedPlayer::repeating("ANSWER: yes")),
    );
    let result = session.run().unwrap();

    let json = serde_json::to_string(&result.trace).unwrap();
    let reloaded: Trace = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, result.trace);

    let fresh = score(&result.trace, &cfg);
    let rescored = score(&reloaded, &cfg);
    assert_eq!(
        fresh.episode_score(BENCH_SCORE),
        rescored.episode_score(BENCH_SCORE)
    );
    assert_eq!(fresh.turns.len(), rescored.turns.len());
}
