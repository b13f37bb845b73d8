//! Core types: roles, configuration, instances, state, text, RNG.
//!
//! This module contains the shared data model the rules, coordinator,
//! and scorer all build on.

pub mod config;
pub mod instance;
pub mod rng;
pub mod role;
pub mod state;
pub mod text;

pub use config::{
    ConfigError, ExperimentConfig, Level, DEFAULT_REPROMPT_LIMIT, LEVEL_1_NUM_CATEGORIES,
    LEVEL_3_NUM_FEATURES, REPROMPT_PENALTY,
};
pub use instance::{GameInstance, InstanceParseError};
pub use rng::GameRng;
pub use role::{Role, RoleMap};
pub use state::GameState;
