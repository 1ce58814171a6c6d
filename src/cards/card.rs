//! Playing cards.
//!
//! Casino is played with a 40-card deck: Ace through 10 in four suits. A
//! card's capture value equals its rank, with the Ace worth 1. Every card
//! is unique, so a `Card` doubles as its own identifier.
//!
//! Cards parse from short codes (`"AS"`, `"10D"`, `"6C"`) which keeps tests
//! and host tooling readable:
//!
//! ```
//! use casino_engine::cards::{Card, Rank, Suit};
//!
//! let card: Card = "10D".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
//! assert_eq!(card.value(), 10);
//! assert!(card.is_big_casino());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Number of cards in a Casino deck.
pub const DECK_SIZE: usize = 40;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Card rank. Face cards are not part of the Casino deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];

    /// Capture value (Ace = 1).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Rank with the given capture value, if any.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => write!(f, "A"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// A single playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Capture value, 1..=10.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    #[must_use]
    pub fn is_spade(self) -> bool {
        self.suit == Suit::Spades
    }

    #[must_use]
    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }

    /// The 10 of diamonds.
    #[must_use]
    pub fn is_big_casino(self) -> bool {
        self.rank == Rank::Ten && self.suit == Suit::Diamonds
    }

    /// The 2 of spades.
    #[must_use]
    pub fn is_little_casino(self) -> bool {
        self.rank == Rank::Two && self.suit == Suit::Spades
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

/// Failure to parse a card code.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card code {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());
        let s = s.trim();
        let split = s.len().checked_sub(1).ok_or_else(err)?;
        if !s.is_char_boundary(split) {
            return Err(err());
        }
        let (rank, suit) = s.split_at(split);

        let rank = match rank.to_ascii_uppercase().as_str() {
            "A" | "1" => Rank::Ace,
            n => n
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_value)
                .ok_or_else(err)?,
        };
        let suit = match suit.to_ascii_uppercase().as_str() {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            _ => return Err(err()),
        };
        Ok(Card::new(rank, suit))
    }
}

/// The full 40-card deck in a fixed order (suit-major).
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Sum of card values.
#[must_use]
pub fn total_value<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|c| u32::from(c.value())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Five.value(), 5);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::from_value(7), Some(Rank::Seven));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(11), None);
    }

    #[test]
    fn test_standard_deck_is_unique() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck.iter().filter(|c| c.is_spade()).count(), 10);
        assert_eq!(deck.iter().filter(|c| c.is_ace()).count(), 4);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("AS".parse::<Card>(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("10d".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("6C".parse::<Card>(), Ok(Card::new(Rank::Six, Suit::Clubs)));
        assert!("KS".parse::<Card>().is_err());
        assert!("11H".parse::<Card>().is_err());
        assert!("5X".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::Six, Suit::Clubs).to_string(), "6♣");
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "A♥");
    }

    #[test]
    fn test_special_cards() {
        let big: Card = "10D".parse().unwrap();
        let little: Card = "2S".parse().unwrap();

        assert!(big.is_big_casino());
        assert!(!big.is_little_casino());
        assert!(little.is_little_casino());
        assert!(little.is_spade());
    }

    #[test]
    fn test_total_value() {
        let cards: Vec<Card> = ["AS", "4D", "5H"].iter().map(|c| c.parse().unwrap()).collect();
        assert_eq!(total_value(&cards), 10);
    }
}
