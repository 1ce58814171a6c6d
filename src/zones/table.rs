//! The shared table: loose cards, builds and staging stacks.
//!
//! Items keep their placement order so hosts can lay the table out stably.
//! Loose cards are located by identity; builds and stacks by `EntityId`.
//! Mutating methods are used by executors on a freshly cloned state only.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Build, Card, Rank, TemporaryStack};
use crate::core::{EngineError, EntityId, PlayerId};

/// One item lying on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableItem {
    Loose(Card),
    Build(Build),
    Stack(TemporaryStack),
}

impl TableItem {
    /// Number of physical cards in this item.
    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            TableItem::Loose(_) => 1,
            TableItem::Build(b) => b.len(),
            TableItem::Stack(s) => s.len(),
        }
    }

    /// Every physical card in this item, bottom to top.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        match self {
            TableItem::Loose(c) => vec![*c],
            TableItem::Build(b) => b.cards.iter().copied().collect(),
            TableItem::Stack(s) => s.cards().collect(),
        }
    }
}

/// The table zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    items: Vector<TableItem>,
}

impl Table {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in placement order.
    pub fn items(&self) -> impl Iterator<Item = &TableItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Physical cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.items.iter().map(TableItem::card_count).sum()
    }

    /// Loose cards in placement order.
    pub fn loose_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.items.iter().filter_map(|item| match item {
            TableItem::Loose(c) => Some(*c),
            _ => None,
        })
    }

    pub fn builds(&self) -> impl Iterator<Item = &Build> {
        self.items.iter().filter_map(|item| match item {
            TableItem::Build(b) => Some(b),
            _ => None,
        })
    }

    pub fn stacks(&self) -> impl Iterator<Item = &TemporaryStack> {
        self.items.iter().filter_map(|item| match item {
            TableItem::Stack(s) => Some(s),
            _ => None,
        })
    }

    #[must_use]
    pub fn has_loose(&self, card: Card) -> bool {
        self.loose_cards().any(|c| c == card)
    }

    /// A loose card of the given rank, if one exists.
    #[must_use]
    pub fn loose_with_rank(&self, rank: Rank) -> Option<Card> {
        self.loose_cards().find(|c| c.rank == rank)
    }

    #[must_use]
    pub fn build(&self, id: EntityId) -> Option<&Build> {
        self.builds().find(|b| b.id == id)
    }

    #[must_use]
    pub fn stack(&self, id: EntityId) -> Option<&TemporaryStack> {
        self.stacks().find(|s| s.id == id)
    }

    /// The build owned by `player`, if any.
    #[must_use]
    pub fn build_owned_by(&self, player: PlayerId) -> Option<&Build> {
        self.builds().find(|b| b.owner == player)
    }

    /// The staging stack owned by `player`, if any.
    #[must_use]
    pub fn stack_owned_by(&self, player: PlayerId) -> Option<&TemporaryStack> {
        self.stacks().find(|s| s.owner == player)
    }

    // === Mutation ===

    pub fn push_loose(&mut self, card: Card) {
        self.items.push_back(TableItem::Loose(card));
    }

    pub fn push_build(&mut self, build: Build) {
        self.items.push_back(TableItem::Build(build));
    }

    pub fn push_stack(&mut self, stack: TemporaryStack) {
        self.items.push_back(TableItem::Stack(stack));
    }

    pub fn remove_loose(&mut self, card: Card) -> Result<(), EngineError> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, TableItem::Loose(c) if *c == card))
            .ok_or(EngineError::MissingFromTable(card))?;
        self.items.remove(pos);
        Ok(())
    }

    pub fn remove_build(&mut self, id: EntityId) -> Result<Build, EngineError> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, TableItem::Build(b) if b.id == id))
            .ok_or(EngineError::MissingTableItem(id))?;
        match self.items.remove(pos) {
            TableItem::Build(b) => Ok(b),
            _ => Err(EngineError::MissingTableItem(id)),
        }
    }

    pub fn remove_stack(&mut self, id: EntityId) -> Result<TemporaryStack, EngineError> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, TableItem::Stack(s) if s.id == id))
            .ok_or(EngineError::MissingTableItem(id))?;
        match self.items.remove(pos) {
            TableItem::Stack(s) => Ok(s),
            _ => Err(EngineError::MissingTableItem(id)),
        }
    }

    /// Replace a build in place, keeping its table position.
    pub fn replace_build(&mut self, build: Build) -> Result<(), EngineError> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, TableItem::Build(b) if b.id == build.id))
            .ok_or(EngineError::MissingTableItem(build.id))?;
        self.items.set(pos, TableItem::Build(build));
        Ok(())
    }

    /// Replace a stack in place, keeping its table position.
    pub fn replace_stack(&mut self, stack: TemporaryStack) -> Result<(), EngineError> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, TableItem::Stack(s) if s.id == stack.id))
            .ok_or(EngineError::MissingTableItem(stack.id))?;
        self.items.set(pos, TableItem::Stack(stack));
        Ok(())
    }

    /// Remove everything, returning the physical cards in placement order.
    pub fn clear(&mut self) -> Vec<Card> {
        let cards = self.items.iter().flat_map(TableItem::cards).collect();
        self.items.clear();
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::StagedCard;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn sample_table() -> Table {
        let mut table = Table::new();
        table.push_loose(card("3H"));
        table.push_build(Build::new(
            EntityId(1),
            Vector::from(vec![card("4D"), card("6C")]),
            10,
            PlayerId::FIRST,
            true,
        ));
        table.push_stack(TemporaryStack::from_pair(
            EntityId(2),
            PlayerId::SECOND,
            StagedCard::table(card("2S")),
            StagedCard::hand(card("5S")),
        ));
        table
    }

    #[test]
    fn test_lookup() {
        let table = sample_table();

        assert_eq!(table.card_count(), 5);
        assert!(table.has_loose(card("3H")));
        assert!(!table.has_loose(card("4D")));
        assert_eq!(table.loose_with_rank(Rank::Three), Some(card("3H")));
        assert_eq!(table.build_owned_by(PlayerId::FIRST).map(|b| b.id), Some(EntityId(1)));
        assert!(table.build_owned_by(PlayerId::SECOND).is_none());
        assert_eq!(table.stack_owned_by(PlayerId::SECOND).map(|s| s.id), Some(EntityId(2)));
    }

    #[test]
    fn test_remove_and_replace() {
        let mut table = sample_table();

        assert!(table.remove_loose(card("3H")).is_ok());
        assert_eq!(table.remove_loose(card("3H")), Err(EngineError::MissingFromTable(card("3H"))));

        let build = table.build(EntityId(1)).cloned().unwrap();
        let mut locked = build.clone();
        locked.extendable = false;
        table.replace_build(locked).unwrap();
        assert!(!table.build(EntityId(1)).unwrap().extendable);

        let removed = table.remove_stack(EntityId(2)).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(table.remove_build(EntityId(2)).is_err());
    }

    #[test]
    fn test_clear_returns_every_card() {
        let mut table = sample_table();
        let cards = table.clear();

        assert_eq!(cards.len(), 5);
        assert!(table.is_empty());
        assert_eq!(cards[0], card("3H"));
    }
}
