//! Capture piles.
//!
//! Each player's pile is a sequence of capture groups, one per capture
//! event, with the capturing card last. Only the top card of the newest
//! group is visible to the rules: it can be borrowed by the opponent
//! ("use opponent's card") or absorbed into a freshly built build.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::EngineError;

/// A player's captured cards, grouped by capture event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureStack {
    groups: Vector<Vector<Card>>,
}

impl CaptureStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture groups, oldest first.
    pub fn groups(&self) -> impl Iterator<Item = &Vector<Card>> {
        self.groups.iter()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Every captured card.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.groups.iter().flat_map(|g| g.iter().copied())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.groups.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    /// Top card of the most recent group.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.groups.back().and_then(|g| g.back().copied())
    }

    /// Record a capture event. Empty groups are ignored.
    pub fn push_group(&mut self, group: impl IntoIterator<Item = Card>) {
        let group: Vector<Card> = group.into_iter().collect();
        if !group.is_empty() {
            self.groups.push_back(group);
        }
    }

    /// Take the top card off the most recent group.
    ///
    /// A group emptied this way is dropped so the previous group's top
    /// card becomes visible.
    pub fn pop_top_card(&mut self) -> Result<Card, EngineError> {
        let mut group = self.groups.pop_back().ok_or(EngineError::EmptyCapturePile)?;
        let card = group.pop_back().ok_or(EngineError::EmptyCapturePile)?;
        if !group.is_empty() {
            self.groups.push_back(group);
        }
        Ok(card)
    }

    /// Put a borrowed card back on top of the most recent group.
    pub fn restore_top_card(&mut self, card: Card) {
        match self.groups.back_mut() {
            Some(group) => group.push_back(card),
            None => self.groups.push_back(Vector::unit(card)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn test_groups_and_top_card() {
        let mut pile = CaptureStack::new();
        assert_eq!(pile.top_card(), None);

        pile.push_group([card("3H"), card("3S")]);
        pile.push_group([card("4D"), card("6C"), card("10H")]);
        pile.push_group(Vec::new());

        assert_eq!(pile.group_count(), 2);
        assert_eq!(pile.card_count(), 5);
        assert_eq!(pile.top_card(), Some(card("10H")));
    }

    #[test]
    fn test_pop_and_restore() {
        let mut pile = CaptureStack::new();
        pile.push_group([card("3H"), card("3S")]);
        pile.push_group([card("9C")]);

        assert_eq!(pile.pop_top_card(), Ok(card("9C")));
        assert_eq!(pile.group_count(), 1);
        assert_eq!(pile.top_card(), Some(card("3S")));

        pile.restore_top_card(card("9C"));
        assert_eq!(pile.top_card(), Some(card("9C")));
        assert_eq!(pile.card_count(), 3);
    }

    #[test]
    fn test_pop_empty_is_error() {
        let mut pile = CaptureStack::new();
        assert_eq!(pile.pop_top_card(), Err(EngineError::EmptyCapturePile));

        pile.restore_top_card(card("AS"));
        assert_eq!(pile.top_card(), Some(card("AS")));
    }
}
