//! Error types.
//!
//! Two kinds of failure exist and they never mix:
//! - `RuleViolation`: the action is well-formed but illegal under the
//!   rules. The reducer reports it as a `Rejected` notice.
//! - `EngineError`: the engine's view of the game is inconsistent with the
//!   action (a card that should be in hand is not) or the host supplied a
//!   bad configuration. Reported as an `InternalError` notice.

use thiserror::Error;

use super::entity::EntityId;
use crate::cards::Card;

/// A rule that forbids the attempted action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("the game is over")]
    GameOver,

    #[error("{0} is not in your hand")]
    CardNotInHand(Card),

    #[error("{0} is not a loose card on the table")]
    CardNotOnTable(Card),

    #[error("{0} is not the top card of your opponent's capture pile")]
    NotOpponentTopCard(Card),

    #[error("build {0} is not on the table")]
    BuildNotFound(EntityId),

    #[error("staging stack {0} is not on the table")]
    StackNotFound(EntityId),

    #[error("staging stack {0} belongs to your opponent")]
    NotYourStack(EntityId),

    #[error("{0} is used more than once in this action")]
    DuplicateCard(Card),

    #[error("you cannot trail while you own a build in round 1")]
    TrailWhileOwningBuild,

    #[error("a {0} is already on the table; capture or build with it instead of trailing")]
    DuplicateRankOnTable(Card),

    #[error("you already own a build")]
    AlreadyOwnBuild,

    #[error("your opponent already owns a build of {0}")]
    OpponentBuildSameValue(u8),

    #[error("builds cannot exceed a value of {max} (would be {value})")]
    BuildValueTooHigh { value: u8, max: u8 },

    #[error("a build value must be at least 1")]
    BuildValueTooLow,

    #[error("you need another card of value {0} in hand to capture this build later")]
    NoCaptureCard(u8),

    #[error("build {0} can no longer be extended")]
    BuildNotExtendable(EntityId),

    #[error("{card} cannot take build {build} to {target}")]
    InvalidBuildTarget { card: Card, build: EntityId, target: u8 },

    #[error("the chosen cards do not divide evenly into groups of {0}")]
    NoPartition(u8),

    #[error("{card} cannot capture a build of {build_value}")]
    BuildValueMismatch { card: Card, build_value: u8 },

    #[error("nothing was selected to capture")]
    NothingToCapture,

    #[error("playing {0} would leave your build without a capture card")]
    WouldStrandOwnBuild(Card),

    #[error("you already have a staging stack on the table")]
    AlreadyStaging,

    #[error("finish or cancel your staging stack first")]
    StagingInProgress,

    #[error("a staging stack may hold only one card from your hand")]
    SecondHandCard,

    #[error("staging stack {0} must contain exactly one card from your hand")]
    StackNeedsHandCard(EntityId),

    #[error("a table-only merge cannot contain a card from your hand")]
    MergeWithHandCard,

    #[error("staging stack {0} is not a pending trail")]
    NotAPendingTrail(EntityId),

    #[error("a build needs at least one card besides the one from your hand")]
    EmptyBuild,

    #[error("staging stack {0} holds your hand card; capture with the stack instead")]
    CaptureStagedHandCard(EntityId),

    #[error("the same target is selected more than once")]
    DuplicateTarget,

    #[error("your opponent has no captured card to use")]
    NoOpponentCard,

    #[error("only one of your opponent's cards can be used at a time")]
    SecondOpponentCard,
}

/// An inconsistency between the engine state and the action being applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("card {0} expected in hand but not found")]
    MissingFromHand(Card),

    #[error("card {0} expected on the table but not found")]
    MissingFromTable(Card),

    #[error("table item {0} expected but not found")]
    MissingTableItem(EntityId),

    #[error("capture pile is empty")]
    EmptyCapturePile,

    #[error("card {0} expected on top of a capture pile but not found")]
    MissingFromCaptures(Card),

    #[error("deck exhausted while dealing")]
    DeckExhausted,

    #[error("snapshot codec failure: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}
