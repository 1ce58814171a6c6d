//! Player actions.
//!
//! Every gesture a host can translate into a rules request is one variant of
//! `Action`. Targets are already resolved: loose cards by identity, builds
//! and staging stacks by `EntityId`. The acting player is always the
//! state's current player.
//!
//! ## Example
//!
//! ```
//! use casino_engine::core::{Action, EntityId};
//! use casino_engine::cards::Card;
//!
//! let six: Card = "6C".parse().unwrap();
//! let four: Card = "4D".parse().unwrap();
//!
//! // Drop the 6 on a loose 4 declaring a build of 10
//! let build = Action::create_build(six, &[four], 10);
//! assert_eq!(build.name(), "create_build");
//!
//! // Capture build #3 with a 10 from hand
//! let ten: Card = "10H".parse().unwrap();
//! let capture = Action::capture_build(ten, EntityId(3));
//! assert!(matches!(capture, Action::Capture { .. }));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::{Card, StagedCard};

/// The card doing the capturing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capturer {
    /// A card played straight from hand.
    Hand(Card),
    /// The hand card inside the actor's staging stack; the rest of the stack
    /// is captured along with it.
    Stack(EntityId),
}

/// Something a capture takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureTarget {
    /// A loose table card.
    Loose(Card),
    /// A build (must match the capturing value).
    Build(EntityId),
    /// The actor's own table-only staging stack.
    Stack(EntityId),
    /// The top card of the opponent's capture pile.
    OpponentTop,
}

/// A complete player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Lay a hand card on the table.
    Trail { card: Card },

    /// Bind a hand card and loose table cards under a declared value.
    CreateBuild {
        card: Card,
        table_cards: SmallVec<[Card; 4]>,
        value: u8,
    },

    /// Add a hand card to a build, reinforcing it (`target_value` equal to
    /// the build's value) or increasing it (`target_value` equal to the
    /// build's value plus the card's).
    ExtendBuild {
        card: Card,
        build: EntityId,
        target_value: u8,
    },

    /// Take cards and builds off the table.
    Capture {
        with: Capturer,
        targets: SmallVec<[CaptureTarget; 4]>,
    },

    /// Open a staging stack from two items.
    StartStack { first: StagedCard, second: StagedCard },

    /// Add an item to the actor's staging stack.
    AddToStack { stack: EntityId, item: StagedCard },

    /// Fold a table-only staging stack into a build. Does not end the turn.
    MergeStack { stack: EntityId, build: EntityId },

    /// Commit a staging stack holding one hand card onto a build.
    ReinforceBuild { stack: EntityId, build: EntityId },

    /// Turn a staging stack into a new build of the declared value.
    FinalizeStack { stack: EntityId, value: u8 },

    /// Confirm a round-2 trail, laying the card loose.
    ConfirmTrail { stack: EntityId },

    /// Return every staged card to where it came from.
    CancelStack { stack: EntityId },
}

impl Action {
    #[must_use]
    pub fn trail(card: Card) -> Self {
        Action::Trail { card }
    }

    #[must_use]
    pub fn create_build(card: Card, table_cards: &[Card], value: u8) -> Self {
        Action::CreateBuild {
            card,
            table_cards: SmallVec::from_slice(table_cards),
            value,
        }
    }

    #[must_use]
    pub fn extend_build(card: Card, build: EntityId, target_value: u8) -> Self {
        Action::ExtendBuild {
            card,
            build,
            target_value,
        }
    }

    /// Capture with a hand card.
    #[must_use]
    pub fn capture(card: Card, targets: &[CaptureTarget]) -> Self {
        Action::Capture {
            with: Capturer::Hand(card),
            targets: SmallVec::from_slice(targets),
        }
    }

    /// Capture loose cards with a hand card.
    #[must_use]
    pub fn capture_loose(card: Card, loose: &[Card]) -> Self {
        Action::Capture {
            with: Capturer::Hand(card),
            targets: loose.iter().map(|&c| CaptureTarget::Loose(c)).collect(),
        }
    }

    /// Capture a single build with a hand card.
    #[must_use]
    pub fn capture_build(card: Card, build: EntityId) -> Self {
        Self::capture(card, &[CaptureTarget::Build(build)])
    }

    /// Capture using the hand card staged in `stack`.
    #[must_use]
    pub fn capture_with_stack(stack: EntityId, targets: &[CaptureTarget]) -> Self {
        Action::Capture {
            with: Capturer::Stack(stack),
            targets: SmallVec::from_slice(targets),
        }
    }

    /// Short, stable name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Trail { .. } => "trail",
            Action::CreateBuild { .. } => "create_build",
            Action::ExtendBuild { .. } => "extend_build",
            Action::Capture { .. } => "capture",
            Action::StartStack { .. } => "start_stack",
            Action::AddToStack { .. } => "add_to_stack",
            Action::MergeStack { .. } => "merge_stack",
            Action::ReinforceBuild { .. } => "reinforce_build",
            Action::FinalizeStack { .. } => "finalize_stack",
            Action::ConfirmTrail { .. } => "confirm_trail",
            Action::CancelStack { .. } => "cancel_stack",
        }
    }
}

/// An accepted action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round when the action was taken.
    pub round: u8,

    /// Position in the game's history, starting at 0.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u8, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}
