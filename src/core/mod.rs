//! Core engine types: IDs, players, RNG, configuration, actions, errors and
//! the game state.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{CasinoConfig, ScoringRules};
pub use action::{Action, ActionRecord, CaptureTarget, Capturer};
pub use error::{EngineError, RuleViolation};
pub use state::GameState;
