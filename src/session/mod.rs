//! Episode driver: wires two players to the coordinator.
//!
//! `GameSession` owns the scheduling the coordinator deliberately does
//! not: it requests utterances, feeds them to the coordinator, appends
//! events to the trace, routes accepted messages, delivers reprompt
//! instructions, and stops on any terminal outcome.
//!
//! Exactly one request is outstanding at a time; execution is strictly
//! sequential. Backend failures from a player propagate out of
//! [`GameSession::run`] untouched.

use tracing::{debug, info};

use crate::core::{ExperimentConfig, GameInstance, Role, RoleMap};
use crate::engine::{Decision, Outcome, TurnCoordinator};
use crate::players::{BackendError, Message, Player};
use crate::trace::{Event, Trace, TraceBuilder};

/// Placeholder for the candidate list in prompt templates.
pub const LIST_PLACEHOLDER: &str = "$LIST$";
/// Placeholder for the hidden target word.
pub const TARGET_PLACEHOLDER: &str = "$TARGET WORD$";
/// Placeholder for the turn budget.
pub const TURNS_PLACEHOLDER: &str = "$N$";

/// Built-in guesser instructions.
const GUESSER_TEMPLATE: &str = "\
Let us play a game. Your task is to find a hidden target word from the \
list of candidate words below by asking yes/no questions about it.\n\n\
Candidate words: $LIST$\n\n\
You have $N$ questions. Ask one question per turn, starting with \
'QUESTION: ' and ending after the question mark. You must not ask about \
letters, word length, syllables, or part of speech, and you must not \
smuggle a guess into a question. When you are ready, make exactly one \
guess starting with 'GUESS: ' followed by a single word.";

/// Built-in answerer instructions.
const ANSWERER_TEMPLATE: &str = "\
Let us play a game. The target word is '$TARGET WORD$'. Another player \
asks yes/no questions about it and you must answer truthfully. Reply \
only with 'ANSWER: yes' or 'ANSWER: no'.";

/// Initial instructions for both roles, rendered from templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompts {
    pub guesser: String,
    pub answerer: String,
}

impl Prompts {
    /// Substitute placeholders in a pair of templates.
    ///
    /// The guesser sees the candidate list and its question budget
    /// (one less than the turn budget, reserving the guess turn); the
    /// answerer sees the target word.
    #[must_use]
    pub fn render(
        guesser_template: &str,
        answerer_template: &str,
        instance: &GameInstance,
        config: &ExperimentConfig,
    ) -> Self {
        let guesser = guesser_template
            .replace(LIST_PLACEHOLDER, &instance.candidate_display())
            .replace(
                TURNS_PLACEHOLDER,
                &config.max_turns.saturating_sub(1).to_string(),
            );
        let answerer = answerer_template
            .replace(TARGET_PLACEHOLDER, &instance.target_word)
            .replace(TURNS_PLACEHOLDER, &config.max_turns.to_string());
        Self { guesser, answerer }
    }

    /// Render the built-in templates.
    #[must_use]
    pub fn built_in(instance: &GameInstance, config: &ExperimentConfig) -> Self {
        Self::render(GUESSER_TEMPLATE, ANSWERER_TEMPLATE, instance, config)
    }
}

/// A finished episode: its outcome and full trace.
#[derive(Debug)]
pub struct EpisodeResult {
    pub outcome: Outcome,
    pub trace: Trace,
}

/// Runs one episode to completion.
pub struct GameSession {
    coordinator: TurnCoordinator,
    guesser: Box<dyn Player>,
    answerer: Box<dyn Player>,
    histories: RoleMap<Vec<Message>>,
    builder: TraceBuilder,
    prompts: Prompts,
    answerer_prompted: bool,
}

impl GameSession {
    /// Set up an episode from an instance and configuration.
    #[must_use]
    pub fn new(
        instance: &GameInstance,
        config: ExperimentConfig,
        guesser: Box<dyn Player>,
        answerer: Box<dyn Player>,
    ) -> Self {
        let prompts = Prompts::built_in(instance, &config);
        Self::with_prompts(instance, config, prompts, guesser, answerer)
    }

    /// Set up an episode with pre-rendered prompts.
    #[must_use]
    pub fn with_prompts(
        instance: &GameInstance,
        config: ExperimentConfig,
        prompts: Prompts,
        guesser: Box<dyn Player>,
        answerer: Box<dyn Player>,
    ) -> Self {
        let coordinator = TurnCoordinator::new(
            config,
            instance.target_word.clone(),
            instance.candidate_list.clone(),
        );
        Self {
            coordinator,
            guesser,
            answerer,
            histories: RoleMap::default(),
            builder: TraceBuilder::new(),
            prompts,
            answerer_prompted: false,
        }
    }

    /// Play the episode to its terminal outcome.
    pub fn run(mut self) -> Result<EpisodeResult, BackendError> {
        let guesser_prompt = self.prompts.guesser.clone();
        self.deliver(Role::Guesser, &guesser_prompt);

        loop {
            if let Some((outcome, event)) = self.coordinator.check_continuation() {
                self.builder.append(event);
                return Ok(self.finish(outcome));
            }
            if self.coordinator.state().current_turn() > 0 {
                self.builder.begin_turn();
            }

            for role in Role::all() {
                if let Some(outcome) = self.play_role_turn(role)? {
                    return Ok(self.finish(outcome));
                }
            }

            self.coordinator.advance_turn();
        }
    }

    /// One role's slot within a logical turn: request, validate, and
    /// retry through the bounded reprompt path until accepted or
    /// terminal.
    fn play_role_turn(&mut self, role: Role) -> Result<Option<Outcome>, BackendError> {
        loop {
            let utterance = self.request(role)?;
            let decided = self.coordinator.process_utterance(role, &utterance);
            for event in decided.events {
                self.builder.append(event);
            }

            match decided.decision {
                Decision::Reprompt { instruction, .. } => {
                    debug!(%role, "delivering reprompt");
                    self.deliver(role, &instruction);
                    // Same logical turn; ask again.
                }
                Decision::Accept(_) => {
                    self.route_from(role, &utterance);
                    return Ok(None);
                }
                Decision::Terminate(outcome) => {
                    // A terminal guess is still shown to the answerer.
                    if role == Role::Guesser && !outcome.is_aborted() {
                        self.route_from(role, &utterance);
                    }
                    return Ok(Some(outcome));
                }
            }
        }
    }

    fn request(&mut self, role: Role) -> Result<String, BackendError> {
        let turn_idx = self.coordinator.state().current_turn();
        let player = match role {
            Role::Guesser => &mut self.guesser,
            Role::Answerer => &mut self.answerer,
        };
        let utterance = player.respond(&self.histories[role], turn_idx)?;
        self.histories[role].push(Message::assistant(utterance.clone()));
        self.builder.append(Event::get_message(role, utterance.clone()));
        Ok(utterance)
    }

    fn deliver(&mut self, role: Role, text: &str) {
        self.histories[role].push(Message::user(text));
        self.builder.append(Event::send_message(role, text));
    }

    fn route_from(&mut self, role: Role, utterance: &str) {
        if let Some((to, text)) = self.coordinator.route_accepted(role, utterance) {
            if to == Role::Answerer && !self.answerer_prompted {
                // Initial instructions are prepended only on the very
                // first exchange.
                let prompt = format!("{}\n\n{}", self.prompts.answerer, text);
                self.answerer_prompted = true;
                self.deliver(to, &prompt);
            } else {
                self.deliver(to, &text);
            }
        }
    }

    fn finish(self, outcome: Outcome) -> EpisodeResult {
        info!(?outcome, "episode finished");
        EpisodeResult {
            outcome,
            trace: self.builder.finish(),
        }
    }
}
