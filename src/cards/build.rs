//! Builds: table groupings bound to a declared capture value.
//!
//! ## Extendability contract
//!
//! A build is *extendable* while it is a single combination of cards summing
//! to its value. It becomes permanently non-extendable when:
//! - it is a base build (several disjoint combinations under one value),
//! - it is reinforced (another combination of the same value is added),
//! - it absorbs another source (a matching loose card, a merged stack, the
//!   opponent's top capture card), or
//! - it holds `max_build_cards` (5 by default) or more cards.
//!
//! Reinforcing and increasing go through one operation whose explicit target
//! value selects the mode; see `rules::validate::validate_extend_build`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::{EntityId, PlayerId};

/// A build on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Unique build identifier.
    pub id: EntityId,

    /// Cards, bottom to top.
    pub cards: Vector<Card>,

    /// Declared capture value (1..=10).
    pub value: u8,

    /// Player bound to capture it. Either player may capture a build of
    /// matching value; ownership moves when the build is stolen.
    pub owner: PlayerId,

    /// Whether the value may still be increased.
    pub extendable: bool,
}

impl Build {
    /// Create a build.
    #[must_use]
    pub fn new(
        id: EntityId,
        cards: Vector<Card>,
        value: u8,
        owner: PlayerId,
        extendable: bool,
    ) -> Self {
        Self {
            id,
            cards,
            value,
            owner,
            extendable,
        }
    }

    /// Number of cards in the build.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Builds always hold at least one card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copy of this build with extra cards on top.
    #[must_use]
    pub fn with_cards_on_top(&self, extra: impl IntoIterator<Item = Card>) -> Self {
        let mut next = self.clone();
        next.cards.extend(extra);
        next
    }

    /// Copy of this build with a card slipped underneath.
    #[must_use]
    pub fn with_card_at_bottom(&self, card: Card) -> Self {
        let mut next = self.clone();
        next.cards.push_front(card);
        next
    }

    /// Lock the build if it reached the card limit.
    #[must_use]
    pub fn capped(mut self, max_build_cards: usize) -> Self {
        if self.cards.len() >= max_build_cards {
            self.extendable = false;
        }
        self
    }
}

impl std::fmt::Display for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Build {} (value {}, {}, [", self.id, self.value, self.owner)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "])")
    }
}
