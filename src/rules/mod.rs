//! Casino rules.
//!
//! - `partition`: the combination engine behind captures and builds
//! - `validate` / `staging`: pure checks that turn actions into plans
//! - `execute`: applies plans to a cloned state
//! - `round` / `scoring`: round transitions and end-of-game scoring
//! - `engine`: the reducer and the `RulesEngine` trait
//! - `legal`: candidate action enumeration

pub mod engine;
pub mod execute;
pub mod legal;
pub mod notice;
pub mod partition;
pub mod round;
pub mod scoring;
pub mod staging;
pub mod validate;

pub use engine::{
    initialize_game, initialize_game_with_seed, reduce, validate_action, ActionPlan, CasinoRules,
    GameResult, ReduceOutcome, RulesEngine,
};
pub use legal::legal_actions;
pub use notice::{Notice, NoticeKind};
pub use partition::{partition, partition_exists, Combo, Partition, MAX_GROUP_VALUE};
pub use scoring::{compute_scores, compute_scores_with, ScoreDetails, ScoreResult};
pub use staging::StagingPlan;
