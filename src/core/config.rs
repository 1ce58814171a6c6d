//! Game configuration types.
//!
//! A Casino game is configured once at startup:
//! - `ScoringRules`: point weights and thresholds used at game end
//! - `CasinoConfig`: deal sizes, build limits, scoring, optional seed
//!
//! Defaults follow the standard two-round, ten-card game. Hosts can tweak
//! values with the `with_*` builders and must call `validate()` (the
//! initializer does so) before dealing.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::cards::DECK_SIZE;

/// Point weights for end-of-game scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points for capturing strictly more than half the deck.
    pub most_cards: u32,

    /// Points awarded to each player when captured cards split evenly.
    pub cards_tie: u32,

    /// Minimum spades captured to earn `spades`.
    pub spades_threshold: usize,

    /// Points for reaching `spades_threshold`.
    pub spades: u32,

    /// Points per Ace.
    pub ace: u32,

    /// Points for the 10 of diamonds.
    pub big_casino: u32,

    /// Points for the 2 of spades.
    pub little_casino: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            most_cards: 2,
            cards_tie: 1,
            spades_threshold: 6,
            spades: 2,
            ace: 1,
            big_casino: 2,
            little_casino: 1,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasinoConfig {
    /// Cards dealt to each player at the start of every round.
    pub hand_size: usize,

    /// Number of rounds in a game.
    pub rounds: u8,

    /// Highest value a build may declare.
    pub max_build_value: u8,

    /// A build holding this many cards can no longer be extended.
    pub max_build_cards: usize,

    /// End-of-game scoring weights.
    pub scoring: ScoringRules,

    /// Shuffle seed. `None` draws a seed from entropy.
    pub seed: Option<u64>,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            hand_size: 10,
            rounds: 2,
            max_build_value: 10,
            max_build_cards: 5,
            scoring: ScoringRules::default(),
            seed: None,
        }
    }
}

impl CasinoConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the card count at which builds lock.
    #[must_use]
    pub fn with_max_build_cards(mut self, max: usize) -> Self {
        self.max_build_cards = max;
        self
    }

    /// Replace the scoring rules.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cards consumed by dealing every round.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        self.hand_size * 2 * usize::from(self.rounds)
    }

    /// Check the configuration is playable with a 40-card deck.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfig("hand_size must be positive"));
        }
        if self.rounds == 0 {
            return Err(EngineError::InvalidConfig("rounds must be positive"));
        }
        if self.cards_dealt() > DECK_SIZE {
            return Err(EngineError::InvalidConfig("deal exceeds the 40-card deck"));
        }
        if !(1..=10).contains(&self.max_build_value) {
            return Err(EngineError::InvalidConfig("max_build_value must be within 1..=10"));
        }
        if self.max_build_cards < 2 {
            return Err(EngineError::InvalidConfig("max_build_cards must be at least 2"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CasinoConfig::default();

        assert_eq!(config.hand_size, 10);
        assert_eq!(config.rounds, 2);
        assert_eq!(config.max_build_value, 10);
        assert_eq!(config.max_build_cards, 5);
        assert_eq!(config.cards_dealt(), 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CasinoConfig::new()
            .with_hand_size(4)
            .with_rounds(1)
            .with_max_build_cards(4)
            .with_seed(99);

        assert_eq!(config.hand_size, 4);
        assert_eq!(config.rounds, 1);
        assert_eq!(config.max_build_cards, 4);
        assert_eq!(config.seed, Some(99));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_oversized_deal() {
        let config = CasinoConfig::new().with_hand_size(11);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_zero_rounds() {
        let config = CasinoConfig::new().with_rounds(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_scoring() {
        let scoring = ScoringRules::default();
        assert_eq!(scoring.most_cards, 2);
        assert_eq!(scoring.cards_tie, 1);
        assert_eq!(scoring.spades_threshold, 6);
        assert_eq!(scoring.big_casino, 2);
        assert_eq!(scoring.little_casino, 1);
    }
}
