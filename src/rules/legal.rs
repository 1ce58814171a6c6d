//! Legal action enumeration.
//!
//! Generates candidate actions from the current player's hand and the
//! table, then keeps the ones the validators accept. Multi-card
//! compositions are limited to what one or two table cards can form; hosts
//! that need every combination build them through staging stacks.

use rustc_hash::FxHashSet;

use super::engine::validate_action;
use crate::cards::{Card, StagedCard};
use crate::core::{Action, CaptureTarget, EntityId, GameState};

/// Accepted candidate actions for `state.current_player`.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.game_over {
        return Vec::new();
    }

    let mut seen = FxHashSet::default();
    candidates(state)
        .into_iter()
        .filter(|action| seen.insert(action.clone()))
        .filter(|action| validate_action(state, action).is_ok())
        .collect()
}

fn candidates(state: &GameState) -> Vec<Action> {
    let player = state.current_player;
    let hand: Vec<Card> = state.hand(player).iter().copied().collect();
    let loose: Vec<Card> = state.table.loose_cards().collect();
    let builds: Vec<(EntityId, u8)> = state.table.builds().map(|b| (b.id, b.value)).collect();
    let mut out = Vec::new();

    // An open stack must be resolved before anything else is accepted
    if let Some(stack) = state.open_stack(player) {
        let id = stack.id;
        out.push(Action::CancelStack { stack: id });
        out.push(Action::ConfirmTrail { stack: id });
        out.push(Action::capture_with_stack(id, &[]));
        for value in 1..=state.config.max_build_value {
            out.push(Action::FinalizeStack { stack: id, value });
        }
        for &(build, _) in &builds {
            out.push(Action::MergeStack { stack: id, build });
            out.push(Action::ReinforceBuild { stack: id, build });
        }
        for &c in &loose {
            out.push(Action::AddToStack {
                stack: id,
                item: StagedCard::table(c),
            });
        }
        for &c in &hand {
            out.push(Action::AddToStack {
                stack: id,
                item: StagedCard::hand(c),
            });
        }
        return out;
    }

    for &card in &hand {
        let value = card.value();
        out.push(Action::trail(card));

        // Everything of the card's value at once, then piece by piece
        let mut matching: Vec<CaptureTarget> = loose
            .iter()
            .filter(|c| c.value() == value)
            .map(|&c| CaptureTarget::Loose(c))
            .collect();
        matching.extend(
            builds
                .iter()
                .filter(|(_, v)| *v == value)
                .map(|&(id, _)| CaptureTarget::Build(id)),
        );
        if !matching.is_empty() {
            out.push(Action::capture(card, &matching));
        }
        for &target in &matching {
            out.push(Action::capture(card, &[target]));
        }
        for (i, &a) in loose.iter().enumerate() {
            for &b in &loose[i + 1..] {
                if a.value() + b.value() == value {
                    out.push(Action::capture_loose(card, &[a, b]));
                }
            }
        }

        for &table_card in &loose {
            out.push(Action::create_build(card, &[table_card], value + table_card.value()));
            if table_card.value() == value {
                out.push(Action::create_build(card, &[table_card], value));
            }
            out.push(Action::StartStack {
                first: StagedCard::hand(card),
                second: StagedCard::table(table_card),
            });
        }

        for &(build, build_value) in &builds {
            out.push(Action::extend_build(card, build, build_value));
            out.push(Action::extend_build(card, build, build_value + value));
        }
    }

    out
}
