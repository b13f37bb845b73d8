//! Turn-by-turn continuation, reprompt, and termination decisions.
//!
//! The coordinator owns the episode's [`GameState`] and encodes the
//! legality rules as a state machine over three phases:
//!
//! - `AwaitingResponse(role)`: the named role owes an utterance
//! - `Reprompting(role)`: the role violated a rule and gets a bounded retry
//! - `Terminated(outcome)`: no further validation occurs
//!
//! The coordinator never owns scheduling. An external driver requests
//! utterances, feeds them to [`TurnCoordinator::process_utterance`], and
//! acts on the returned decision. Rule violations are recoverable via
//! the bounded reprompt path; exhausting the budget aborts the episode.
//! Backend failures never reach the coordinator.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{ExperimentConfig, GameState, Role};
use crate::rules::{classify, ParsedUtterance, Verdict};
use crate::trace::{ActionType, Event, GM};

/// Terminal episode outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The guess matched the target word.
    CorrectGuess,
    /// The guess missed the target word.
    IncorrectGuess,
    /// The turn budget ran out before a guess.
    MaxTurnsReached,
    /// Reprompt budget exhausted on a format violation.
    AbortedFormat,
    /// Reprompt budget exhausted on a content violation.
    AbortedContent,
    /// Reprompt budget exhausted while violation flags persisted.
    AbortedReprompt,
}

impl Outcome {
    /// The episode ended without a valid outcome.
    #[must_use]
    pub const fn is_aborted(self) -> bool {
        matches!(
            self,
            Outcome::AbortedFormat | Outcome::AbortedContent | Outcome::AbortedReprompt
        )
    }
}

/// Coordinator phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the named role's utterance.
    AwaitingResponse(Role),
    /// The named role is being offered a bounded retry.
    Reprompting(Role),
    /// The episode is over.
    Terminated(Outcome),
}

/// Control decision returned to the driver for one utterance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The utterance was accepted; play continues with the other role.
    Accept(ParsedUtterance),
    /// The role violated a rule and must retry the same logical turn.
    Reprompt {
        /// The role being reprompted.
        role: Role,
        /// The fixed retry instruction to deliver to that role.
        instruction: String,
    },
    /// The episode is over.
    Terminate(Outcome),
}

/// A decision plus the error/outcome events the driver must append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnDecision {
    pub decision: Decision,
    pub events: SmallVec<[Event; 4]>,
}

/// Drives one episode's validation and continuation decisions.
#[derive(Clone, Debug)]
pub struct TurnCoordinator {
    config: ExperimentConfig,
    state: GameState,
    phase: Phase,
}

impl TurnCoordinator {
    /// Create a coordinator for a fresh episode. The guesser moves first.
    #[must_use]
    pub fn new(
        config: ExperimentConfig,
        target_word: impl Into<String>,
        candidate_list: Vec<String>,
    ) -> Self {
        Self {
            config,
            state: GameState::new(target_word, candidate_list),
            phase: Phase::AwaitingResponse(Role::Guesser),
        }
    }

    /// The episode configuration.
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The episode state (read-only outside the coordinator).
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Terminal outcome, if the episode is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Advance the logical turn counter. Called by the driver after both
    /// roles' accepted turns.
    pub fn advance_turn(&mut self) {
        self.state.advance_turn();
    }

    /// Validate one received utterance and decide how play continues.
    pub fn process_utterance(&mut self, role: Role, utterance: &str) -> TurnDecision {
        if let Phase::Terminated(outcome) = self.phase {
            // Terminal once terminal; no further validation occurs.
            return TurnDecision {
                decision: Decision::Terminate(outcome),
                events: SmallVec::new(),
            };
        }

        self.state.reset_flags();
        let verdict = classify(
            role,
            utterance,
            self.state.candidate_list(),
            self.state.target_word(),
        );
        debug!(%role, format_valid = verdict.format_valid, content_valid = verdict.content_valid, "classified utterance");

        let mut events = SmallVec::new();
        if !verdict.format_valid {
            self.state.invalid_format = true;
            for error in &verdict.format_errors {
                events.push(Event::log_to_self(ActionType::InvalidFormat, error.message()));
            }
        }
        if !verdict.content_valid {
            self.state.invalid_content = true;
            for rule in &verdict.content_errors {
                events.push(Event::log_to_self(ActionType::InvalidContent, rule.message()));
            }
        }

        if self.state.has_violation() {
            return self.decide_violation(role, &verdict, events);
        }

        match verdict.parsed.expect("valid verdict carries a parse") {
            ParsedUtterance::Guess { word, correct } => {
                self.state.record_guess(word.clone(), correct);
                let (kind, outcome) = if correct {
                    (ActionType::CorrectGuess, Outcome::CorrectGuess)
                } else {
                    (ActionType::IncorrectGuess, Outcome::IncorrectGuess)
                };
                events.push(Event::log_to_self(kind, word));
                self.terminate(outcome);
                TurnDecision {
                    decision: Decision::Terminate(outcome),
                    events,
                }
            }
            parsed @ (ParsedUtterance::Question { .. } | ParsedUtterance::Answer { .. }) => {
                events.push(Event::log_to_self(ActionType::ValidResponse, "continue"));
                self.phase = Phase::AwaitingResponse(role.other());
                TurnDecision {
                    decision: Decision::Accept(parsed),
                    events,
                }
            }
        }
    }

    fn decide_violation(
        &mut self,
        role: Role,
        verdict: &Verdict,
        mut events: SmallVec<[Event; 4]>,
    ) -> TurnDecision {
        if self.state.reprompt_count(role) < self.config.reprompt_limit {
            self.state.consume_reprompt(role);
            self.phase = Phase::Reprompting(role);
            let instruction = reprompt_instruction(role, verdict).to_string();
            debug!(%role, count = self.state.reprompt_count(role), "reprompting");
            events.push(Event::new(
                GM,
                role.wire_name(),
                ActionType::SendReprompt,
                instruction.clone(),
            ));
            return TurnDecision {
                decision: Decision::Reprompt { role, instruction },
                events,
            };
        }

        // Budget already consumed; the violation is fatal.
        let outcome = if self.state.invalid_format {
            Outcome::AbortedFormat
        } else {
            Outcome::AbortedContent
        };
        self.terminate(outcome);
        TurnDecision {
            decision: Decision::Terminate(outcome),
            events,
        }
    }

    /// Continuation predicate, checked before starting a new turn.
    ///
    /// Returns the forced outcome and the event to log, if the episode
    /// must end now.
    pub fn check_continuation(&mut self) -> Option<(Outcome, Event)> {
        if let Phase::Terminated(outcome) = self.phase {
            let content = if outcome.is_aborted() {
                "abort game"
            } else {
                "end game"
            };
            return Some((outcome, Event::log_to_self(terminal_kind(outcome), content)));
        }
        if self.state.current_turn() >= self.config.max_turns {
            self.terminate(Outcome::MaxTurnsReached);
            return Some((
                Outcome::MaxTurnsReached,
                Event::log_to_self(
                    ActionType::MaxTurnsReached,
                    self.config.max_turns.to_string(),
                ),
            ));
        }
        if let Phase::Reprompting(role) = self.phase {
            if self.state.has_violation()
                && self.state.reprompt_count(role) == self.config.reprompt_limit
                && self.config.reprompt_limit == 0
            {
                // Zero-budget configuration: a violation can never recover.
                self.terminate(Outcome::AbortedReprompt);
                return Some((
                    Outcome::AbortedReprompt,
                    Event::log_to_self(ActionType::InvalidFormat, "abort game"),
                ));
            }
        }
        None
    }

    /// Where an accepted utterance is routed next.
    ///
    /// The guesser's accepted turn (question or terminal guess) goes to
    /// the answerer verbatim; the answerer's accepted turn goes back to
    /// the guesser unless a guess outcome already ended the episode.
    #[must_use]
    pub fn route_accepted(&self, from: Role, utterance: &str) -> Option<(Role, String)> {
        match from {
            Role::Guesser => Some((Role::Answerer, utterance.to_string())),
            Role::Answerer => {
                if self.state.guess_concluded() {
                    None
                } else {
                    Some((Role::Guesser, utterance.to_string()))
                }
            }
        }
    }

    fn terminate(&mut self, outcome: Outcome) {
        info!(?outcome, turn = self.state.current_turn(), "episode terminated");
        self.phase = Phase::Terminated(outcome);
    }
}

/// Fixed retry instruction delivered to a reprompted role.
#[must_use]
fn reprompt_instruction(role: Role, verdict: &Verdict) -> &'static str {
    match role {
        Role::Answerer => {
            "INVALID ANSWER. Please answer only with 'ANSWER: yes' or 'ANSWER: no'."
        }
        Role::Guesser if !verdict.format_valid => {
            "INVALID FORMAT. Please ask a question starting with 'QUESTION: ' or make your guess starting with 'GUESS: '."
        }
        Role::Guesser => {
            "INVALID QUESTION. That kind of question is not allowed. Please ask a different question."
        }
    }
}

fn terminal_kind(outcome: Outcome) -> ActionType {
    match outcome {
        Outcome::CorrectGuess => ActionType::CorrectGuess,
        Outcome::IncorrectGuess => ActionType::IncorrectGuess,
        Outcome::MaxTurnsReached => ActionType::MaxTurnsReached,
        Outcome::AbortedFormat | Outcome::AbortedReprompt => ActionType::InvalidFormat,
        Outcome::AbortedContent => ActionType::InvalidContent,
    }
}
