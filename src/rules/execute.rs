//! Action executors.
//!
//! Executors apply a validated plan to a *cloned* state. They only fail
//! with `EngineError`, which means the plan and the state disagree; the
//! reducer then discards the clone.

use im::Vector;

use super::notice::Notice;
use super::validate::{BuildPlan, BuildSource, CapturePlan, ExtendPlan, TrailPlan};
use crate::cards::{Build, Card, Origin, StagedCard, TemporaryStack};
use crate::core::{CaptureTarget, Capturer, EngineError, GameState, PlayerId};

/// What an executor did, beyond the state change itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// The turn passes to the opponent.
    pub ends_turn: bool,
    pub notices: Vec<Notice>,
}

impl Applied {
    #[must_use]
    pub fn turn_ends() -> Self {
        Self {
            ends_turn: true,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn turn_continues() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

pub fn execute_trail(
    state: &mut GameState,
    player: PlayerId,
    plan: &TrailPlan,
) -> Result<Applied, EngineError> {
    state.remove_from_hand(player, plan.card)?;

    if plan.staged {
        let id = state.alloc_entity();
        state
            .table
            .push_stack(TemporaryStack::single(id, player, StagedCard::hand(plan.card)));
        return Ok(Applied::turn_continues().with_notice(Notice::info(format!(
            "Confirm to trail {}, or keep adding to the stack",
            plan.card
        ))));
    }

    state.table.push_loose(plan.card);
    Ok(Applied::turn_ends())
}

/// Create a build (or grow the actor's same-value build) from a plan.
///
/// Card order, bottom to top: absorbed loose cards, then the composed
/// cards (table cards before the hand card, or the stack order). A card
/// taken from the opponent's pile goes underneath everything.
pub fn execute_build(
    state: &mut GameState,
    player: PlayerId,
    plan: &BuildPlan,
) -> Result<Applied, EngineError> {
    let composed: Vec<Card> = match &plan.source {
        BuildSource::Hand { card, table_cards } => {
            state.remove_from_hand(player, *card)?;
            for &c in table_cards {
                state.table.remove_loose(c)?;
            }
            table_cards.iter().copied().chain(std::iter::once(*card)).collect()
        }
        BuildSource::Stack(id) => state.table.remove_stack(*id)?.cards().collect(),
    };
    for &c in &plan.absorbed_loose {
        state.table.remove_loose(c)?;
    }
    let cards: Vector<Card> = plan.absorbed_loose.iter().copied().chain(composed).collect();

    let mut build = match plan.consolidate_into {
        Some(id) => {
            let existing = state.table.build(id).ok_or(EngineError::MissingTableItem(id))?;
            let mut merged = existing.with_cards_on_top(cards);
            merged.extendable = false;
            merged
        }
        None => Build::new(state.alloc_entity(), cards, plan.value, player, plan.extendable),
    };

    let mut applied = Applied::turn_ends();
    let opponent = player.opponent();
    if state.captures[opponent]
        .top_card()
        .is_some_and(|c| c.value() == build.value)
    {
        let taken = state.captures[opponent].pop_top_card()?;
        build = build.with_card_at_bottom(taken);
        build.extendable = false;
        applied = applied.with_notice(Notice::info(format!(
            "{} from {}'s captures joins the build",
            taken, opponent
        )));
    }

    let build = build.capped(state.config.max_build_cards);
    if plan.consolidate_into.is_some() {
        state.table.replace_build(build)?;
    } else {
        state.table.push_build(build);
    }
    Ok(applied)
}

pub fn execute_extend(
    state: &mut GameState,
    player: PlayerId,
    plan: &ExtendPlan,
) -> Result<Applied, EngineError> {
    state.remove_from_hand(player, plan.card)?;

    let build = state
        .table
        .build(plan.build)
        .ok_or(EngineError::MissingTableItem(plan.build))?;
    let mut next = build.with_cards_on_top([plan.card]);
    next.value = plan.value;
    next.owner = player;
    next.extendable = plan.extendable;
    state.table.replace_build(next.capped(state.config.max_build_cards))?;

    let mut applied = Applied::turn_ends();
    if let Some(previous) = plan.stolen_from {
        applied = applied.with_notice(Notice::info(format!(
            "{} takes over {}'s build at {}",
            player, previous, plan.value
        )));
    }
    Ok(applied)
}

/// Move captured cards into a new group on the actor's pile.
///
/// Group order: table cards, then the opponent's card, then the capturing
/// card on top.
pub fn execute_capture(
    state: &mut GameState,
    player: PlayerId,
    plan: &CapturePlan,
) -> Result<Applied, EngineError> {
    let mut table_cards = Vec::new();
    let mut opponent_cards = Vec::new();

    match plan.with {
        Capturer::Hand(card) => state.remove_from_hand(player, card)?,
        Capturer::Stack(id) => {
            let stack = state.table.remove_stack(id)?;
            split_staged(&stack, &mut table_cards, &mut opponent_cards);
        }
    }

    for &target in &plan.targets {
        match target {
            CaptureTarget::Loose(c) => {
                state.table.remove_loose(c)?;
                table_cards.push(c);
            }
            CaptureTarget::Build(id) => {
                let build = state.table.remove_build(id)?;
                table_cards.extend(build.cards.iter().copied());
            }
            CaptureTarget::Stack(id) => {
                let stack = state.table.remove_stack(id)?;
                split_staged(&stack, &mut table_cards, &mut opponent_cards);
            }
            CaptureTarget::OpponentTop => {
                opponent_cards.push(state.captures[player.opponent()].pop_top_card()?);
            }
        }
    }

    let captured = table_cards.len() + opponent_cards.len();
    state.captures[player].push_group(
        table_cards
            .into_iter()
            .chain(opponent_cards)
            .chain(std::iter::once(plan.capturing_card)),
    );
    state.last_capturer = Some(player);

    let mut applied = Applied::turn_ends();
    if state.table.is_empty() {
        applied = applied.with_notice(Notice::info(format!(
            "{} clears the table with {}",
            player, plan.capturing_card
        )));
    } else if captured > 1 {
        applied = applied.with_notice(Notice::info(format!(
            "{} captures {} cards with {}",
            player, captured, plan.capturing_card
        )));
    }
    Ok(applied)
}

/// Sort a staged stack's non-hand cards into table and opponent cards.
fn split_staged(
    stack: &TemporaryStack,
    table_cards: &mut Vec<Card>,
    opponent_cards: &mut Vec<Card>,
) {
    for item in stack.items.iter() {
        match item.origin {
            Origin::Hand => {}
            Origin::Table => table_cards.push(item.card),
            Origin::OpponentCapture => opponent_cards.push(item.card),
        }
    }
}
