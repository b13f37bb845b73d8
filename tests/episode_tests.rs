//! End-to-end episode tests using scripted players.
//!
//! These tests drive full episodes through `GameSession`: prompt
//! delivery, validation, reprompting, routing, and termination, then
//! check the resulting trace shape.

use guess_what::core::{ExperimentConfig, GameInstance, Level};
use guess_what::engine::Outcome;
use guess_what::players::ScriptedPlayer;
use guess_what::session::GameSession;
use guess_what::trace::{ActionType, Trace};

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

fn run_episode(
    cfg: ExperimentConfig,
    guesser: ScriptedPlayer,
    answerer: ScriptedPlayer,
) -> (Outcome, Trace) {
    let session = GameSession::new(&instance(), cfg, Box::new(guesser), Box::new(answerer));
    let result = session.run().unwrap();
    (result.outcome, result.trace)
}

fn events_of_kind(trace: &Trace, kind: ActionType) -> usize {
    trace
        .turns
        .iter()
        .flat_map(|t| &t.events)
        .filter(|e| e.action.kind == kind)
        .count()
}

// =============================================================================
// Clean Episodes
// =============================================================================

/// Two questions, then a correct guess.
#[test]
fn test_happy_path_win() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::new([
            "QUESTION: Is it an animal?",
            "QUESTION: Is it a pet?",
            "GUESS: cat",
        ]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::CorrectGuess);
    assert_eq!(trace.turns.len(), 3);
    assert_eq!(events_of_kind(&trace, ActionType::CorrectGuess), 1);
    assert_eq!(events_of_kind(&trace, ActionType::InvalidFormat), 0);
    assert_eq!(events_of_kind(&trace, ActionType::SendReprompt), 0);
}

/// A wrong guess ends the episode as a loss, and the answerer still
/// sees the guess.
#[test]
fn test_incorrect_guess_loses() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::new(["GUESS: dog"]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::IncorrectGuess);
    assert_eq!(trace.turns.len(), 1);

    let last = trace.turns[0].events.last().unwrap();
    assert_eq!(last.action.kind, ActionType::SendMessage);
    assert_eq!(last.to, "Player 2");
    assert!(last.action.content.ends_with("GUESS: dog"));
}

/// Guess matching is normalization-based, not literal.
#[test]
fn test_punctuated_guess_still_wins() {
    let (outcome, _) = run_episode(
        config(),
        ScriptedPlayer::new(["GUESS: Cat."]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );
    assert_eq!(outcome, Outcome::CorrectGuess);
}

/// The budget runs out with neither guess nor violation.
#[test]
fn test_max_turns_cutoff() {
    let mut cfg = config();
    cfg.max_turns = 2;
    let (outcome, trace) = run_episode(
        cfg,
        ScriptedPlayer::repeating("QUESTION: Is it an animal?"),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::MaxTurnsReached);
    assert_eq!(trace.turns.len(), 2);
    assert_eq!(events_of_kind(&trace, ActionType::MaxTurnsReached), 1);
}

// =============================================================================
// Reprompt Path
// =============================================================================

/// A forbidden question costs a reprompt but the episode recovers.
#[test]
fn test_content_violation_recovers() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::new([
            "QUESTION: Does the target word have the letter a?",
            "QUESTION: Is it an animal?",
            "GUESS: cat",
        ]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::CorrectGuess);
    // The violation and its accepted retry share one logical turn.
    assert_eq!(trace.turns.len(), 2);
    assert_eq!(events_of_kind(&trace, ActionType::InvalidContent), 1);
    assert_eq!(events_of_kind(&trace, ActionType::SendReprompt), 1);
}

/// A multi-word guess is a format violation; the retried single-word
/// guess still terminates the episode within the same turn.
#[test]
fn test_multiword_guess_reprompted() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::new(["GUESS: the cat", "GUESS: cat"]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::CorrectGuess);
    assert_eq!(trace.turns.len(), 1);
    assert_eq!(events_of_kind(&trace, ActionType::InvalidFormat), 1);
}

/// A persistent guesser format violation exhausts the budget.
#[test]
fn test_persistent_format_violation_aborts() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::repeating("I think it is the cat"),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    assert_eq!(outcome, Outcome::AbortedFormat);
    assert_eq!(trace.turns.len(), 1);
    assert_eq!(events_of_kind(&trace, ActionType::InvalidFormat), 2);
    assert_eq!(events_of_kind(&trace, ActionType::SendReprompt), 1);
}

/// A persistent forbidden question aborts with a content outcome.
#[test]
fn test_persistent_content_violation_aborts() {
    let (outcome, _) = run_episode(
        config(),
        ScriptedPlayer::repeating("QUESTION: Does the target word have exactly 5 letters?"),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );
    assert_eq!(outcome, Outcome::AbortedContent);
}

/// The answerer gets its own reprompt budget.
#[test]
fn test_answerer_violation_aborts_after_retry() {
    let (outcome, trace) = run_episode(
        config(),
        ScriptedPlayer::repeating("QUESTION: Is it an animal?"),
        ScriptedPlayer::repeating("Well, maybe"),
    );

    assert_eq!(outcome, Outcome::AbortedFormat);
    // Both error events were triggered by "Player 2" utterances.
    let reprompts: Vec<&str> = trace
        .turns
        .iter()
        .flat_map(|t| &t.events)
        .filter(|e| e.action.kind == ActionType::SendReprompt)
        .map(|e| e.to.as_str())
        .collect();
    assert_eq!(reprompts, ["Player 2"]);
}

/// Accepted answer literals include the capitalized and dotted forms.
#[test]
fn test_accepted_answer_literals() {
    for answer in ["ANSWER: yes", "ANSWER: no", "ANSWER: Yes.", "ANSWER: No"] {
        let (outcome, _) = run_episode(
            config(),
            ScriptedPlayer::new(["QUESTION: Is it an animal?", "GUESS: cat"]),
            ScriptedPlayer::repeating(answer),
        );
        assert_eq!(outcome, Outcome::CorrectGuess, "answer {answer:?}");
    }
}

// =============================================================================
// Prompt Delivery
// =============================================================================

/// The guesser's first delivery is the rendered instructions; the
/// answerer's instructions ride along with the first question only.
#[test]
fn test_prompt_delivery_order() {
    let (_, trace) = run_episode(
        config(),
        ScriptedPlayer::new([
            "QUESTION: Is it an animal?",
            "QUESTION: Is it a pet?",
            "GUESS: cat",
        ]),
        ScriptedPlayer::repeating("ANSWER: yes"),
    );

    let first = &trace.turns[0].events[0];
    assert_eq!(first.action.kind, ActionType::SendMessage);
    assert_eq!(first.to, "Player 1");
    assert!(first.action.content.contains("['cat', 'dog', 'car']"));

    let to_answerer: Vec<&str> = trace
        .turns
        .iter()
        .flat_map(|t| &t.events)
        .filter(|e| e.action.kind == ActionType::SendMessage && e.to == "Player 2")
        .map(|e| e.action.content.as_str())
        .collect();
    assert!(to_answerer[0].contains("The target word is 'cat'"));
    assert!(!to_answerer[1].contains("The target word"));
}
