//! End-of-game scoring.
//!
//! Scores depend only on the two capture piles, so `compute_scores` is
//! usable on its own (a host can preview standings mid-game).

use serde::{Deserialize, Serialize};

use crate::cards::DECK_SIZE;
use crate::core::{PlayerId, PlayerMap, ScoringRules};
use crate::zones::CaptureStack;

/// One player's scoring breakdown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub cards: usize,
    pub spades: usize,
    pub aces: usize,
    pub big_casino: bool,
    pub little_casino: bool,

    pub most_cards_points: u32,
    pub spades_points: u32,
    pub ace_points: u32,
    pub casino_points: u32,
    pub total: u32,
}

/// Scores for both players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreResult {
    pub scores: PlayerMap<u32>,
    pub details: PlayerMap<ScoreDetails>,
    /// Strictly higher total; `None` on a tie.
    pub winner: Option<PlayerId>,
}

/// Score capture piles with the default rules.
///
/// ```
/// use casino_engine::core::{PlayerId, PlayerMap};
/// use casino_engine::rules::compute_scores;
/// use casino_engine::zones::CaptureStack;
///
/// let result = compute_scores(&PlayerMap::<CaptureStack>::default());
/// assert_eq!(result.winner, None);
/// assert_eq!(result.scores[PlayerId::FIRST], 0);
/// ```
#[must_use]
pub fn compute_scores(captures: &PlayerMap<CaptureStack>) -> ScoreResult {
    compute_scores_with(captures, &ScoringRules::default())
}

#[must_use]
pub fn compute_scores_with(
    captures: &PlayerMap<CaptureStack>,
    rules: &ScoringRules,
) -> ScoreResult {
    let mut details = captures.map(|_, pile| tally(pile, rules));

    let half = DECK_SIZE / 2;
    let (first, second) = (details[PlayerId::FIRST].cards, details[PlayerId::SECOND].cards);
    if first == half && second == half {
        for (_, d) in details.iter_mut() {
            d.most_cards_points = rules.cards_tie;
        }
    } else {
        for (_, d) in details.iter_mut() {
            if d.cards > half {
                d.most_cards_points = rules.most_cards;
            }
        }
    }

    for (_, d) in details.iter_mut() {
        d.total = d.most_cards_points + d.spades_points + d.ace_points + d.casino_points;
    }

    let scores = details.map(|_, d| d.total);
    let winner = match scores[PlayerId::FIRST].cmp(&scores[PlayerId::SECOND]) {
        std::cmp::Ordering::Greater => Some(PlayerId::FIRST),
        std::cmp::Ordering::Less => Some(PlayerId::SECOND),
        std::cmp::Ordering::Equal => None,
    };

    ScoreResult {
        scores,
        details,
        winner,
    }
}

/// Per-pile counts and the points that do not depend on the other pile.
fn tally(pile: &CaptureStack, rules: &ScoringRules) -> ScoreDetails {
    let mut d = ScoreDetails::default();
    for card in pile.cards() {
        d.cards += 1;
        if card.is_spade() {
            d.spades += 1;
        }
        if card.is_ace() {
            d.aces += 1;
        }
        d.big_casino |= card.is_big_casino();
        d.little_casino |= card.is_little_casino();
    }

    if d.spades >= rules.spades_threshold {
        d.spades_points = rules.spades;
    }
    d.ace_points = rules.ace * d.aces as u32;
    if d.big_casino {
        d.casino_points += rules.big_casino;
    }
    if d.little_casino {
        d.casino_points += rules.little_casino;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    fn pile(cards: impl IntoIterator<Item = Card>) -> CaptureStack {
        let mut stack = CaptureStack::new();
        stack.push_group(cards);
        stack
    }

    /// `n` plain cards: no spades, aces or casinos.
    fn plain(n: usize) -> Vec<Card> {
        [Suit::Hearts, Suit::Clubs, Suit::Diamonds]
            .iter()
            .flat_map(|&suit| {
                [
                    Rank::Three,
                    Rank::Four,
                    Rank::Five,
                    Rank::Six,
                    Rank::Seven,
                    Rank::Eight,
                    Rank::Nine,
                    Rank::Ten,
                ]
                .into_iter()
                .map(move |rank| Card::new(rank, suit))
            })
            .filter(|c| !c.is_big_casino())
            .take(n)
            .collect()
    }

    #[test]
    fn test_most_cards() {
        let cards = plain(21);
        let captures = PlayerMap::from([pile(cards.iter().copied()), CaptureStack::new()]);
        let result = compute_scores(&captures);
        assert_eq!(result.scores[PlayerId::FIRST], 2);
        assert_eq!(result.scores[PlayerId::SECOND], 0);
        assert_eq!(result.winner, Some(PlayerId::FIRST));
    }

    #[test]
    fn test_twenty_one_to_nineteen() {
        let cards = plain(23);
        // 19 + 2 plain spades for the first player keeps spades under threshold
        let extra = [Card::new(Rank::Three, Suit::Spades), Card::new(Rank::Four, Suit::Spades)];
        let first = pile(cards[..19].iter().copied().chain(extra));
        let second = pile(cards[..19].iter().copied());

        let result = compute_scores(&PlayerMap::from([first, second]));
        assert_eq!(result.scores.to_array(), [2, 0]);
        assert_eq!(result.winner, Some(PlayerId::FIRST));
        assert_eq!(result.details[PlayerId::FIRST].cards, 21);
    }

    #[test]
    fn test_even_split_scores_one_each() {
        let cards = plain(20);
        let captures = PlayerMap::from([pile(cards.iter().copied()), pile(cards.iter().copied())]);
        let result = compute_scores(&captures);
        assert_eq!(result.scores.to_array(), [1, 1]);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_special_cards() {
        let cards = vec![
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Diamonds),
            Card::new(Rank::Two, Suit::Spades),
        ];
        let result = compute_scores(&PlayerMap::from([pile(cards), CaptureStack::new()]));
        let d = &result.details[PlayerId::FIRST];

        assert_eq!(d.aces, 2);
        assert!(d.big_casino);
        assert!(d.little_casino);
        assert_eq!(d.ace_points, 2);
        assert_eq!(d.casino_points, 3);
        assert_eq!(d.total, 5);
    }

    #[test]
    fn test_spades_threshold_both_players() {
        let spades: Vec<Card> = Rank::ALL.iter().map(|&r| Card::new(r, Suit::Spades)).collect();
        let first = pile(spades[2..8].iter().copied());
        let second = pile(spades[4..10].iter().copied());

        let result = compute_scores(&PlayerMap::from([first, second]));
        assert_eq!(result.details[PlayerId::FIRST].spades_points, 2);
        assert_eq!(result.details[PlayerId::SECOND].spades_points, 2);
    }

    #[test]
    fn test_custom_weights() {
        let rules = ScoringRules {
            ace: 3,
            ..ScoringRules::default()
        };
        let ace = Card::new(Rank::Ace, Suit::Hearts);
        let captures = PlayerMap::from([pile([ace]), CaptureStack::new()]);
        assert_eq!(compute_scores_with(&captures, &rules).scores[PlayerId::FIRST], 3);
    }
}
