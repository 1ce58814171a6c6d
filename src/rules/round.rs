//! Round and game transitions.
//!
//! Runs after every accepted action. A round ends when both hands are
//! empty and no staging stack is open. Intermediate rounds deal fresh hands
//! (the table carries over); the final round sweeps the table to the last
//! capturer, scores and freezes the state.

use tracing::info;

use super::notice::{Notice, NoticeKind};
use super::scoring::compute_scores_with;
use crate::core::{EngineError, GameState};

/// Apply a pending round transition, if any.
pub fn advance_round(state: &mut GameState) -> Result<Vec<Notice>, EngineError> {
    if state.game_over || !state.is_round_over() {
        return Ok(Vec::new());
    }

    if state.round < state.config.rounds {
        state.round += 1;
        state.deal(state.config.hand_size)?;
        info!(round = state.round, deck = state.deck.len(), "dealt new round");
        return Ok(vec![Notice::new(
            NoticeKind::RoundOver,
            format!("Round {} begins", state.round),
        )]);
    }

    Ok(vec![finish_game(state)])
}

/// Sweep, score and freeze.
fn finish_game(state: &mut GameState) -> Notice {
    if let Some(sweeper) = state.last_capturer {
        let swept = state.table.clear();
        if !swept.is_empty() {
            info!(player = %sweeper, cards = swept.len(), "last capturer sweeps the table");
            state.captures[sweeper].push_group(swept);
        }
    }

    let result = compute_scores_with(&state.captures, &state.config.scoring);
    state.scores = result.scores;
    state.score_details = result.details;
    state.winner = result.winner;
    state.game_over = true;

    let [first, second] = state.scores.to_array();
    info!(first, second, winner = ?state.winner, "game over");

    let message = match state.winner {
        Some(winner) => format!("{} wins {}-{}", winner, first.max(second), first.min(second)),
        None => format!("Draw at {}-{}", first, second),
    };
    Notice::new(NoticeKind::GameOver, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, Card};
    use crate::core::{CasinoConfig, PlayerId};
    use im::Vector;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn test_no_transition_mid_round() {
        let mut state = GameState::new(CasinoConfig::default(), 0, Vector::new());
        state.add_to_hand(PlayerId::FIRST, card("5H"));

        assert!(advance_round(&mut state).unwrap().is_empty());
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_deals_next_round() {
        let deck: Vector<Card> = standard_deck().into_iter().take(20).collect();
        let mut state = GameState::new(CasinoConfig::default(), 0, deck);
        state.table.push_loose(card("5H"));

        let notices = advance_round(&mut state).unwrap();
        assert_eq!(notices[0].kind, NoticeKind::RoundOver);
        assert_eq!(state.round, 2);
        assert_eq!(state.hand(PlayerId::FIRST).len(), 10);
        assert_eq!(state.hand(PlayerId::SECOND).len(), 10);
        assert!(state.table.has_loose(card("5H")));
        assert!(state.deck.is_empty());
    }

    #[test]
    fn test_final_round_sweeps_and_scores() {
        let mut state = GameState::new(CasinoConfig::default(), 0, Vector::new());
        state.round = 2;
        state.last_capturer = Some(PlayerId::SECOND);
        state.table.push_loose(card("10D"));
        state.table.push_loose(card("2S"));

        let notices = advance_round(&mut state).unwrap();
        assert_eq!(notices[0].kind, NoticeKind::GameOver);
        assert!(state.game_over);
        assert!(state.table.is_empty());
        assert_eq!(state.scores[PlayerId::SECOND], 3);
        assert_eq!(state.winner, Some(PlayerId::SECOND));
        assert!(state.score_details[PlayerId::SECOND].big_casino);
    }

    #[test]
    fn test_no_capturer_leaves_table() {
        let mut state = GameState::new(CasinoConfig::default(), 0, Vector::new());
        state.round = 2;
        state.table.push_loose(card("10D"));

        advance_round(&mut state).unwrap();
        assert!(state.game_over);
        assert!(state.table.has_loose(card("10D")));
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut state = GameState::new(CasinoConfig::default(), 0, Vector::new());
        state.round = 2;
        advance_round(&mut state).unwrap();
        assert!(advance_round(&mut state).unwrap().is_empty());
    }
}
