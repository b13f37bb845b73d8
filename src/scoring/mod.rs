//! Post-hoc scoring of a finished episode trace.
//!
//! [`score`] is a pure function over an immutable trace plus the
//! episode configuration. It never mutates shared state, so traces from
//! independent episodes can be scored in parallel by an outer harness.

pub mod metrics;

use tracing::info;

use crate::core::{ExperimentConfig, Role, RoleMap, REPROMPT_PENALTY};
use crate::trace::{ActionType, Trace};

pub use metrics::{
    Metrics, BENCH_SCORE, METRIC_ABORTED, METRIC_ACCURACY, METRIC_INVALID_CONTENT_ANSWERER,
    METRIC_INVALID_CONTENT_GUESSER, METRIC_INVALID_FORMAT_ANSWERER, METRIC_INVALID_FORMAT_GUESSER,
    METRIC_LOSE, METRIC_REPETITION_ANSWERER, METRIC_REPETITION_GUESSER, METRIC_REQUEST_COUNT,
    METRIC_REQUEST_COUNT_PARSED, METRIC_REQUEST_COUNT_VIOLATED, METRIC_REQUEST_SUCCESS,
    METRIC_SPEED, METRIC_SUCCESS,
};

/// Compute per-turn and episode metrics from a finished trace.
#[must_use]
pub fn score(trace: &Trace, config: &ExperimentConfig) -> Metrics {
    let mut m = Metrics::default();

    // Per-role, per-kind violation counts. A violation event is
    // attributed to the role whose utterance immediately precedes it;
    // follow-up error events for the same utterance sit behind a GM
    // event and are not counted again.
    let mut invalid_format: RoleMap<u32> = RoleMap::default();
    let mut invalid_content: RoleMap<u32> = RoleMap::default();
    let mut reprompts: RoleMap<u32> = RoleMap::default();

    let mut guesser_won = false;
    let mut violated_request_count = 0u32;
    let mut parsed_request_count = 0u32;
    let mut request_count = 0u32;

    let mut prev_content: RoleMap<Option<String>> = RoleMap::default();
    let mut repetition: RoleMap<u32> = RoleMap::default();

    for (turn_idx, turn) in trace.turns.iter().enumerate() {
        let mut violated_in_turn = false;
        let mut turn_content: RoleMap<Option<String>> = RoleMap::default();

        for (event_idx, event) in turn.events.iter().enumerate() {
            match event.action.kind {
                ActionType::InvalidFormat | ActionType::InvalidContent => {
                    violated_in_turn = true;
                    if let Some(role) = event_idx
                        .checked_sub(1)
                        .and_then(|i| sender_role(&turn.events[i].from))
                    {
                        let counter = if event.action.kind == ActionType::InvalidFormat {
                            &mut invalid_format
                        } else {
                            &mut invalid_content
                        };
                        counter[role] += 1;
                    }
                }
                ActionType::CorrectGuess => guesser_won = true,
                ActionType::SendReprompt => {
                    if let Some(role) = sender_role(&event.to) {
                        reprompts[role] += 1;
                    }
                }
                ActionType::GetMessage => {
                    if let Some(role) = sender_role(&event.from) {
                        // Keep the last utterance per role: the accepted
                        // retry of a reprompted turn, if any.
                        turn_content[role] = Some(event.action.content.clone());
                    }
                }
                _ => {}
            }
        }

        // One logical request per turn regardless of role.
        let violated = u32::from(violated_in_turn);
        request_count += 1;
        violated_request_count += violated;
        parsed_request_count += 1 - violated;

        for role in Role::all() {
            if turn_content[role].is_some() && turn_content[role] == prev_content[role] {
                repetition[role] += 1;
            }
            prev_content[role] = turn_content[role].take();
        }

        m.log_turn_score(turn_idx, METRIC_ACCURACY, f64::from(u8::from(guesser_won)));
        m.log_turn_score(turn_idx, METRIC_REQUEST_COUNT, 1.0);
        m.log_turn_score(turn_idx, METRIC_REQUEST_COUNT_VIOLATED, f64::from(violated));
        m.log_turn_score(
            turn_idx,
            METRIC_REQUEST_COUNT_PARSED,
            f64::from(1 - violated),
        );
    }

    m.log_episode_score(METRIC_REQUEST_COUNT, f64::from(request_count));
    m.log_episode_score(
        METRIC_REQUEST_COUNT_VIOLATED,
        f64::from(violated_request_count),
    );
    m.log_episode_score(
        METRIC_REQUEST_COUNT_PARSED,
        f64::from(parsed_request_count),
    );
    m.log_episode_score(
        METRIC_REQUEST_SUCCESS,
        if request_count == 0 {
            0.0
        } else {
            round2(f64::from(parsed_request_count) / f64::from(request_count))
        },
    );

    // A role aborts the episode once its violations outrun the reprompt
    // budget: a reprompt was exhausted without eventual acceptance.
    let violations_of = |role: Role| invalid_format[role] + invalid_content[role];
    let aborted = Role::all().any(|role| violations_of(role) > config.reprompt_limit);

    if aborted {
        m.log_episode_score(METRIC_ABORTED, 1.0);
        // No valid outcome: success/lose and the bench score are undefined.
        m.log_episode_score(METRIC_SUCCESS, f64::NAN);
        m.log_episode_score(METRIC_LOSE, f64::NAN);
        m.log_episode_score(BENCH_SCORE, f64::NAN);
    } else {
        m.log_episode_score(METRIC_ABORTED, 0.0);
        if guesser_won {
            m.log_episode_score(METRIC_SUCCESS, 1.0);
            m.log_episode_score(METRIC_LOSE, 0.0);

            let speed = speed_score(request_count, config);
            m.log_episode_score(METRIC_SPEED, speed);

            let penalty = f64::from(reprompts[Role::Guesser]) * REPROMPT_PENALTY;
            m.log_episode_score(BENCH_SCORE, (speed - penalty).max(0.0));
        } else {
            m.log_episode_score(METRIC_SUCCESS, 0.0);
            m.log_episode_score(METRIC_LOSE, 1.0);
            m.log_episode_score(BENCH_SCORE, 0.0);
        }
    }

    m.log_episode_score(
        METRIC_INVALID_FORMAT_GUESSER,
        f64::from(invalid_format[Role::Guesser]),
    );
    m.log_episode_score(
        METRIC_INVALID_FORMAT_ANSWERER,
        f64::from(invalid_format[Role::Answerer]),
    );
    m.log_episode_score(
        METRIC_INVALID_CONTENT_GUESSER,
        f64::from(invalid_content[Role::Guesser]),
    );
    m.log_episode_score(
        METRIC_INVALID_CONTENT_ANSWERER,
        f64::from(invalid_content[Role::Answerer]),
    );
    m.log_episode_score(
        METRIC_REPETITION_GUESSER,
        f64::from(repetition[Role::Guesser]),
    );
    m.log_episode_score(
        METRIC_REPETITION_ANSWERER,
        f64::from(repetition[Role::Answerer]),
    );

    info!(
        aborted,
        guesser_won,
        requests = request_count,
        "scored episode"
    );
    m
}

/// Speed of a winning episode relative to the level's lower bound.
///
/// 100 at or below the lower bound, then a linear descent to 0 at the
/// turn budget, floored at 0.
fn speed_score(request_count: u32, config: &ExperimentConfig) -> f64 {
    let max_turns = f64::from(config.max_turns);
    let lower_bound = config.level.lower_bound_turns(config.max_turns);
    let requests = f64::from(request_count);

    if requests <= lower_bound {
        100.0
    } else {
        (100.0 * (max_turns - requests) / (max_turns - lower_bound)).max(0.0)
    }
}

fn sender_role(wire_name: &str) -> Option<Role> {
    Role::all().find(|role| role.wire_name() == wire_name)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
