//! Game state.
//!
//! `GameState` holds everything the rules need: deck, hands, table, capture
//! piles, turn and round bookkeeping, and the final result once the game is
//! over. It is built from `im` persistent collections, so `clone()` is
//! cheap and structurally shared.
//!
//! ## Immutability
//!
//! The reducer never mutates a state it was handed. It clones, applies the
//! transition to the clone, and returns the clone. The `&mut self` methods
//! here exist for that clone-then-apply step and for test setup.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::CasinoConfig;
use super::entity::EntityId;
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Build, Card, TemporaryStack};
use crate::rules::scoring::ScoreDetails;
use crate::zones::{CaptureStack, Table};

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Configuration the game was started with.
    pub config: CasinoConfig,

    /// Seed used for the shuffle.
    pub seed: u64,

    /// Undealt cards; the next card dealt is the front.
    pub deck: Vector<Card>,

    /// Cards in each player's hand.
    pub hands: PlayerMap<Vector<Card>>,

    /// Loose cards, builds and staging stacks.
    pub table: Table,

    /// Each player's capture pile.
    pub captures: PlayerMap<CaptureStack>,

    /// Player whose turn it is.
    pub current_player: PlayerId,

    /// Current round, starting at 1.
    pub round: u8,

    /// Final points (zero until the game ends).
    pub scores: PlayerMap<u32>,

    /// Final scoring breakdown (default until the game ends).
    pub score_details: PlayerMap<ScoreDetails>,

    /// Set once the last round has been scored.
    pub game_over: bool,

    /// Winner, if the game is over and not tied.
    pub winner: Option<PlayerId>,

    /// Last player to make a capture; receives the final sweep.
    pub last_capturer: Option<PlayerId>,

    /// Accepted actions in order.
    pub history: Vector<ActionRecord>,

    next_entity_id: EntityId,
}

impl GameState {
    /// Create an empty, undealt state with the given deck.
    #[must_use]
    pub fn new(config: CasinoConfig, seed: u64, deck: Vector<Card>) -> Self {
        Self {
            config,
            seed,
            deck,
            hands: PlayerMap::default(),
            table: Table::new(),
            captures: PlayerMap::default(),
            current_player: PlayerId::FIRST,
            round: 1,
            scores: PlayerMap::default(),
            score_details: PlayerMap::default(),
            game_over: false,
            winner: None,
            last_capturer: None,
            history: Vector::new(),
            next_entity_id: EntityId::FIRST,
        }
    }

    // === Entity Management ===

    /// Allocate a new build/stack ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id = id.next();
        id
    }

    // === Hands ===

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    #[must_use]
    pub fn has_in_hand(&self, player: PlayerId, card: Card) -> bool {
        self.hands[player].contains(&card)
    }

    pub fn add_to_hand(&mut self, player: PlayerId, card: Card) {
        self.hands[player].push_back(card);
    }

    pub fn remove_from_hand(&mut self, player: PlayerId, card: Card) -> Result<(), EngineError> {
        let pos = self.hands[player]
            .index_of(&card)
            .ok_or(EngineError::MissingFromHand(card))?;
        self.hands[player].remove(pos);
        Ok(())
    }

    /// True when neither player holds a card.
    #[must_use]
    pub fn hands_empty(&self) -> bool {
        self.hands.iter().all(|(_, h)| h.is_empty())
    }

    /// Deal `count` cards to each player, alternating, starting with the
    /// first seat.
    pub fn deal(&mut self, count: usize) -> Result<(), EngineError> {
        for _ in 0..count {
            for player in PlayerId::all() {
                let card = self.deck.pop_front().ok_or(EngineError::DeckExhausted)?;
                self.hands[player].push_back(card);
            }
        }
        Ok(())
    }

    // === Queries ===

    /// The build `player` owns, if any.
    #[must_use]
    pub fn owned_build(&self, player: PlayerId) -> Option<&Build> {
        self.table.build_owned_by(player)
    }

    /// The staging stack `player` has open, if any.
    #[must_use]
    pub fn open_stack(&self, player: PlayerId) -> Option<&TemporaryStack> {
        self.table.stack_owned_by(player)
    }

    /// The card `player` may borrow from the opponent's capture pile.
    #[must_use]
    pub fn opponent_top_card(&self, player: PlayerId) -> Option<Card> {
        self.captures[player.opponent()].top_card()
    }

    /// Physical cards across deck, hands, table and capture piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(|(_, h)| h.len()).sum::<usize>()
            + self.table.card_count()
            + self.captures.iter().map(|(_, c)| c.card_count()).sum::<usize>()
    }

    /// Both hands are spent and no staging is in progress.
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.hands_empty() && self.table.stacks().next().is_none()
    }

    // === Turn ===

    /// Hand the turn to the other player.
    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Record an accepted action in history.
    pub fn record_action(&mut self, player: PlayerId, action: crate::core::Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.round, sequence));
    }

    // === Snapshots ===

    /// Encode the full state as a compact binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_snapshot`.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_deck;

    fn fresh() -> GameState {
        GameState::new(CasinoConfig::default(), 1, standard_deck().into_iter().collect())
    }

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn test_new_state() {
        let state = fresh();

        assert_eq!(state.round, 1);
        assert_eq!(state.current_player, PlayerId::FIRST);
        assert_eq!(state.card_count(), 40);
        assert!(state.hands_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn test_deal_alternates() {
        let mut state = fresh();
        state.deal(2).unwrap();

        let deck = standard_deck();
        let hand = |p: PlayerId| state.hand(p).iter().copied().collect::<Vec<_>>();
        assert_eq!(hand(PlayerId::FIRST), vec![deck[0], deck[2]]);
        assert_eq!(hand(PlayerId::SECOND), vec![deck[1], deck[3]]);
        assert_eq!(state.deck.len(), 36);
        assert_eq!(state.card_count(), 40);
    }

    #[test]
    fn test_deal_exhausted() {
        let mut state = GameState::new(CasinoConfig::default(), 1, Vector::unit(card("AS")));
        assert_eq!(state.deal(1), Err(EngineError::DeckExhausted));
    }

    #[test]
    fn test_hand_removal() {
        let mut state = fresh();
        state.add_to_hand(PlayerId::FIRST, card("5H"));

        assert!(state.has_in_hand(PlayerId::FIRST, card("5H")));
        assert!(state.remove_from_hand(PlayerId::FIRST, card("5H")).is_ok());
        assert_eq!(
            state.remove_from_hand(PlayerId::FIRST, card("5H")),
            Err(EngineError::MissingFromHand(card("5H")))
        );
    }

    #[test]
    fn test_alloc_entity_is_monotonic() {
        let mut state = fresh();
        let a = state.alloc_entity();
        let b = state.alloc_entity();
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = fresh();
        state.deal(1).unwrap();

        let mut copy = state.clone();
        copy.advance_turn();
        copy.hands[PlayerId::FIRST].clear();

        assert_eq!(state.current_player, PlayerId::FIRST);
        assert_eq!(state.hand(PlayerId::FIRST).len(), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = fresh();
        state.deal(3).unwrap();
        state.table.push_loose(card("AS"));

        let bytes = state.to_snapshot().unwrap();
        let restored = GameState::from_snapshot(&bytes).unwrap();

        assert_eq!(state, restored);
    }

    #[test]
    fn test_snapshot_garbage_is_error() {
        assert!(matches!(
            GameState::from_snapshot(&[1, 2, 3]),
            Err(EngineError::Snapshot(_))
        ));
    }
}
