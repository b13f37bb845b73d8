//! Episode state machine.

pub mod coordinator;

pub use coordinator::{Decision, Outcome, Phase, TurnCoordinator, TurnDecision};
