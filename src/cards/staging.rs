//! Staging stacks: provisional compositions that have not been committed.
//!
//! A player assembles a stack over several gestures, pulling cards from
//! their hand, the loose table cards and the top of the opponent's capture
//! pile. Each staged card remembers where it came from so a cancelled stack
//! can put everything back.
//!
//! Invariants (enforced by the staging validators):
//! - at most one stack per owner on the table,
//! - at most one card tagged `Origin::Hand` per stack,
//! - items keep the order they were added in; nothing re-sorts them after
//!   the initial pair is placed.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::{EntityId, PlayerId};

/// Where a staged card was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// The stack owner's hand.
    Hand,
    /// A loose card on the table.
    Table,
    /// The top card of the opponent's most recent capture group.
    OpponentCapture,
}

/// A card inside a staging stack, tagged with its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagedCard {
    pub card: Card,
    pub origin: Origin,
}

impl StagedCard {
    #[must_use]
    pub const fn new(card: Card, origin: Origin) -> Self {
        Self { card, origin }
    }

    #[must_use]
    pub const fn hand(card: Card) -> Self {
        Self::new(card, Origin::Hand)
    }

    #[must_use]
    pub const fn table(card: Card) -> Self {
        Self::new(card, Origin::Table)
    }

    #[must_use]
    pub const fn opponent(card: Card) -> Self {
        Self::new(card, Origin::OpponentCapture)
    }
}

/// A provisional stack owned by one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryStack {
    /// Unique stack identifier.
    pub id: EntityId,

    /// Staged cards, bottom to top.
    pub items: Vector<StagedCard>,

    /// Player assembling the stack.
    pub owner: PlayerId,
}

impl TemporaryStack {
    /// Start a stack from a pair of items, larger value at the bottom.
    ///
    /// Equal values keep the order given.
    #[must_use]
    pub fn from_pair(id: EntityId, owner: PlayerId, first: StagedCard, second: StagedCard) -> Self {
        let items = if second.card.value() > first.card.value() {
            Vector::from(vec![second, first])
        } else {
            Vector::from(vec![first, second])
        };
        Self { id, items, owner }
    }

    /// Start a single-card stack (a round-2 trail awaiting confirmation).
    #[must_use]
    pub fn single(id: EntityId, owner: PlayerId, item: StagedCard) -> Self {
        Self {
            id,
            items: Vector::unit(item),
            owner,
        }
    }

    /// Copy of this stack with `item` appended on top.
    #[must_use]
    pub fn with_item(&self, item: StagedCard) -> Self {
        let mut next = self.clone();
        next.items.push_back(item);
        next
    }

    /// Plain cards, bottom to top.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.items.iter().map(|i| i.card)
    }

    /// Number of staged cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of cards taken from the owner's hand (0 or 1).
    #[must_use]
    pub fn hand_count(&self) -> usize {
        self.items.iter().filter(|i| i.origin == Origin::Hand).count()
    }

    /// The hand card in this stack, if any.
    #[must_use]
    pub fn hand_card(&self) -> Option<Card> {
        self.items
            .iter()
            .find(|i| i.origin == Origin::Hand)
            .map(|i| i.card)
    }

    /// Cards other than the hand card, bottom to top.
    pub fn non_hand_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.items
            .iter()
            .filter(|i| i.origin != Origin::Hand)
            .map(|i| i.card)
    }

    /// True for a lone hand card: a round-2 trail waiting to be confirmed.
    #[must_use]
    pub fn is_pending_trail(&self) -> bool {
        self.items.len() == 1 && self.hand_count() == 1
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.items.iter().any(|i| i.card == card)
    }
}
