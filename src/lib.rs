//! # guess-what
//!
//! A two-player word guessing game engine with turn validation and
//! episode scoring.
//!
//! A guesser narrows down a fixed candidate list by asking yes/no
//! questions; an answerer who knows the target replies. Utterances are
//! validated against format and content rules, invalid ones are retried
//! within a bounded reprompt budget, and finished episodes are scored
//! from their event trace alone.
//!
//! ## Design Principles
//!
//! 1. **Validation Is Pure**: Classifying an utterance never mutates
//!    state. The coordinator applies verdicts; the rules only judge.
//!
//! 2. **Trace Is the Record**: Everything the scorer needs is in the
//!    event trace. Scoring never peeks at engine internals, so traces
//!    can be persisted and re-scored later.
//!
//! 3. **Deterministic Instances**: Candidate lists are sampled from a
//!    fixed taxonomy with a seeded RNG. Same seed, same instances.
//!
//! ## Modules
//!
//! - `core`: Roles, configuration, instances, game state, RNG
//! - `rules`: Format and content validation of utterances
//! - `engine`: Turn coordinator state machine
//! - `trace`: Event trace recording
//! - `scoring`: Trace-based episode and turn metrics
//! - `players`: Player trait and scripted test players
//! - `session`: Episode driver wiring players to the coordinator
//! - `generator`: Instance sampling from the built-in taxonomy

pub mod core;
pub mod rules;
pub mod engine;
pub mod trace;
pub mod scoring;
pub mod players;
pub mod session;
pub mod generator;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, ExperimentConfig, GameInstance, GameRng, GameState, Level, Role, RoleMap,
    DEFAULT_REPROMPT_LIMIT,
};

pub use crate::rules::{classify, ContentRule, FormatError, ParsedUtterance, Verdict};

pub use crate::engine::{Decision, Outcome, Phase, TurnCoordinator, TurnDecision};

pub use crate::trace::{ActionType, Event, EventAction, Trace, TraceBuilder, Turn, GM};

pub use crate::scoring::{score, Metrics};

pub use crate::players::{BackendError, ChatRole, Message, Player, ScriptedPlayer};

pub use crate::session::{EpisodeResult, GameSession, Prompts};

pub use crate::generator::{InstanceGenerator, INSTANCE_SIZE};
