//! # casino-engine
//!
//! Rules engine for Casino, the two-player fishing card game.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `reduce(state, action)` returns a new state and a
//!    list of notices. The input is never mutated and nothing panics on
//!    bad input.
//!
//! 2. **Typed Outcomes**: Illegal actions produce a `RuleViolation`; engine
//!    inconsistencies produce an `EngineError`. Hosts see both as notices.
//!
//! 3. **Resolved Targets**: Actions name cards by identity and builds or
//!    staging stacks by `EntityId`. The engine knows nothing of screens or
//!    drop zones.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so every
//!   reducer call can work on a copy.
//!
//! - **Deterministic Shuffles**: `GameRng` (ChaCha8) makes a seed fully
//!   reproduce a deal.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, RNG, configuration, actions, errors, state
//! - `cards`: Cards, builds and staging stacks
//! - `zones`: The table and the capture piles
//! - `rules`: Partitioning, validation, execution, rounds, scoring, reducer
//!
//! ## Example
//!
//! ```
//! use casino_engine::{initialize_game_with_seed, reduce, legal_actions, CasinoConfig};
//!
//! let state = initialize_game_with_seed(CasinoConfig::default(), 3).unwrap();
//! let action = legal_actions(&state).remove(0);
//! let outcome = reduce(&state, &action);
//!
//! assert!(outcome.accepted);
//! assert_eq!(outcome.state.card_count(), 40);
//! ```

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap,
    GameRng,
    CasinoConfig, ScoringRules,
    Action, ActionRecord, CaptureTarget, Capturer,
    EngineError, RuleViolation,
    GameState,
};

pub use crate::cards::{Build, Card, Origin, Rank, StagedCard, Suit, TemporaryStack};

pub use crate::zones::{CaptureStack, Table, TableItem};

pub use crate::rules::{
    compute_scores, initialize_game, initialize_game_with_seed, legal_actions, partition,
    partition_exists, reduce, CasinoRules, GameResult, Notice, NoticeKind, ReduceOutcome,
    RulesEngine, ScoreDetails, ScoreResult,
};
