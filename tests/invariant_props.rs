//! Random-play property tests.
//!
//! Drives seeded games with arbitrary choices among the legal actions and
//! checks the structural invariants after every reducer call.

use casino_engine::cards::{Card, DECK_SIZE};
use casino_engine::core::{Action, CasinoConfig, GameState, PlayerId};
use casino_engine::rules::{initialize_game_with_seed, legal_actions, reduce};
use casino_engine::zones::TableItem;
use proptest::prelude::*;
use proptest::sample::Index;
use rustc_hash::FxHashSet;

fn all_cards(state: &GameState) -> Vec<Card> {
    let mut cards: Vec<Card> = state.deck.iter().copied().collect();
    for (_, hand) in state.hands.iter() {
        cards.extend(hand.iter().copied());
    }
    for item in state.table.items() {
        cards.extend(item.cards());
    }
    for (_, pile) in state.captures.iter() {
        cards.extend(pile.cards());
    }
    cards
}

fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let cards = all_cards(state);
    prop_assert_eq!(cards.len(), DECK_SIZE);
    let distinct: FxHashSet<Card> = cards.iter().copied().collect();
    prop_assert_eq!(distinct.len(), DECK_SIZE, "a card is duplicated");

    for player in PlayerId::all() {
        prop_assert!(state.table.builds().filter(|b| b.owner == player).count() <= 1);
        prop_assert!(state.table.stacks().filter(|s| s.owner == player).count() <= 1);
    }

    for item in state.table.items() {
        match item {
            TableItem::Build(build) => {
                prop_assert!(build.value >= 1 && build.value <= 10);
                prop_assert!(build.len() >= 2);
                if build.len() >= state.config.max_build_cards {
                    prop_assert!(!build.extendable);
                }
            }
            TableItem::Stack(stack) => prop_assert!(stack.hand_count() <= 1),
            TableItem::Loose(_) => {}
        }
    }

    // The acting player is the only one who can have a stack open
    prop_assert!(state.open_stack(state.current_player.opponent()).is_none());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: random legal play keeps all 40 cards accounted for, never
    /// gives a player two builds or two stacks, and never lays a round-2
    /// trail straight onto the table.
    #[test]
    fn prop_random_play_preserves_invariants(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<Index>(), 120),
    ) {
        let mut state = initialize_game_with_seed(CasinoConfig::default(), seed).unwrap();
        check_invariants(&state)?;

        for choice in &choices {
            if state.game_over {
                break;
            }
            let actions = legal_actions(&state);
            prop_assert!(!actions.is_empty(), "no legal action in {:?}", state);
            let action = choice.get(&actions).clone();

            let outcome = reduce(&state, &action);
            prop_assert!(
                outcome.accepted,
                "{:?} listed as legal but rejected: {:?}",
                action,
                outcome.notices
            );

            if let (Action::Trail { card }, 2) = (&action, state.round) {
                prop_assert!(!outcome.state.table.has_loose(*card));
                prop_assert!(outcome.state.open_stack(state.current_player).is_some());
            }

            check_invariants(&outcome.state)?;
            state = outcome.state;
        }
    }

    /// Property: rejected actions return the input state untouched.
    #[test]
    fn prop_rejections_leave_state_unchanged(seed in any::<u64>(), pick in any::<Index>()) {
        let state = initialize_game_with_seed(CasinoConfig::default(), seed).unwrap();
        let opponent_hand: Vec<Card> = state.hand(PlayerId::SECOND).iter().copied().collect();
        let card = *pick.get(&opponent_hand);

        let outcome = reduce(&state, &Action::trail(card));
        prop_assert!(!outcome.accepted);
        prop_assert_eq!(outcome.state, state);
    }

    /// Property: snapshots decode to the state they were taken from.
    #[test]
    fn prop_snapshot_restores_state(seed in any::<u64>(), steps in 0usize..12) {
        let mut state = initialize_game_with_seed(CasinoConfig::default(), seed).unwrap();
        for _ in 0..steps {
            let Some(action) = legal_actions(&state).into_iter().next() else { break };
            state = reduce(&state, &action).state;
        }

        let bytes = state.to_snapshot().unwrap();
        prop_assert_eq!(GameState::from_snapshot(&bytes).unwrap(), state);
    }
}
