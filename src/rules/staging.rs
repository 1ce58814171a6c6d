//! Staging stack transactions.
//!
//! A staging stack is opened, grown, and then resolved exactly once: merged
//! into a build, committed as a reinforcement or a new build, confirmed as
//! a trail, or cancelled. Only commits consume the hand card and end the
//! turn; table-only merges and cancels leave the turn with the actor.
//!
//! A commit that holds the hand card but whose cards do not partition is
//! not rejected outright: the stack is disbanded, its cards become loose
//! and the turn ends.

use im::Vector;

use super::execute::{execute_build, Applied};
use super::notice::{Notice, NoticeKind};
use super::partition::partition_exists;
use super::validate::{
    ensure_distinct, ensure_in_hand, ensure_live, holds_capture_card, keeps_build_covered,
    own_stack, plan_build, BuildPlan, BuildSource,
};
use crate::cards::{Card, Origin, StagedCard, TemporaryStack};
use crate::core::{EngineError, EntityId, GameState, PlayerId, RuleViolation};

/// An accepted staging action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StagingPlan {
    Start { first: StagedCard, second: StagedCard },
    Add { stack: EntityId, item: StagedCard },
    Merge { stack: EntityId, build: EntityId },
    Reinforce {
        stack: EntityId,
        build: EntityId,
        stolen_from: Option<PlayerId>,
    },
    Finalize(BuildPlan),
    ConfirmTrail { stack: EntityId, card: Card },
    Cancel { stack: EntityId },
    /// A failed commit: scatter the stack and end the turn.
    Disband { stack: EntityId, reason: RuleViolation },
}

impl StagingPlan {
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(
            self,
            StagingPlan::Reinforce { .. }
                | StagingPlan::Finalize(_)
                | StagingPlan::ConfirmTrail { .. }
                | StagingPlan::Disband { .. }
        )
    }
}

// === Validation ===

pub fn validate_start_stack(
    state: &GameState,
    player: PlayerId,
    first: StagedCard,
    second: StagedCard,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    if state.open_stack(player).is_some() {
        return Err(RuleViolation::AlreadyStaging);
    }
    ensure_distinct(&[first.card, second.card])?;

    let count = |origin: Origin| [first, second].iter().filter(|i| i.origin == origin).count();
    if count(Origin::Hand) > 1 {
        return Err(RuleViolation::SecondHandCard);
    }
    if count(Origin::OpponentCapture) > 1 {
        return Err(RuleViolation::SecondOpponentCard);
    }
    ensure_available(state, player, first)?;
    ensure_available(state, player, second)?;

    Ok(StagingPlan::Start { first, second })
}

pub fn validate_add_to_stack(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
    item: StagedCard,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    let stack = own_stack(state, player, stack_id)?;

    if stack.contains(item.card) {
        return Err(RuleViolation::DuplicateCard(item.card));
    }
    match item.origin {
        Origin::Hand if stack.hand_count() > 0 => return Err(RuleViolation::SecondHandCard),
        Origin::OpponentCapture
            if stack.items.iter().any(|i| i.origin == Origin::OpponentCapture) =>
        {
            return Err(RuleViolation::SecondOpponentCard)
        }
        _ => {}
    }
    ensure_available(state, player, item)?;

    Ok(StagingPlan::Add { stack: stack_id, item })
}

/// Fold a table-only stack into a build. The build keeps its owner.
pub fn validate_merge_stack(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
    build_id: EntityId,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    let stack = own_stack(state, player, stack_id)?;
    if stack.hand_count() > 0 {
        return Err(RuleViolation::MergeWithHandCard);
    }
    let build = state
        .table
        .build(build_id)
        .ok_or(RuleViolation::BuildNotFound(build_id))?;

    let cards: Vec<Card> = build.cards.iter().copied().chain(stack.cards()).collect();
    if !partition_exists(&cards, build.value) {
        return Err(RuleViolation::NoPartition(build.value));
    }

    Ok(StagingPlan::Merge {
        stack: stack_id,
        build: build_id,
    })
}

/// Commit a stack holding the actor's hand card onto a build.
pub fn validate_reinforce_build(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
    build_id: EntityId,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    let stack = own_stack(state, player, stack_id)?;
    if stack.hand_count() != 1 {
        return Err(RuleViolation::StackNeedsHandCard(stack_id));
    }
    let build = state
        .table
        .build(build_id)
        .ok_or(RuleViolation::BuildNotFound(build_id))?;
    let stealing = build.owner != player;

    if stealing && state.owned_build(player).is_some() {
        return Err(RuleViolation::AlreadyOwnBuild);
    }
    if !holds_capture_card(state, player, build.value, None) {
        return Err(RuleViolation::NoCaptureCard(build.value));
    }

    let cards: Vec<Card> = build.cards.iter().copied().chain(stack.cards()).collect();
    if !partition_exists(&cards, build.value) {
        return disband(state, player, stack, RuleViolation::NoPartition(build.value));
    }

    Ok(StagingPlan::Reinforce {
        stack: stack_id,
        build: build_id,
        stolen_from: stealing.then_some(build.owner),
    })
}

/// Turn a stack into a new build of `value`.
pub fn validate_finalize_stack(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
    value: u8,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    let stack = own_stack(state, player, stack_id)?;
    if stack.hand_count() != 1 {
        return Err(RuleViolation::StackNeedsHandCard(stack_id));
    }

    let cards: Vec<Card> = stack.cards().collect();
    match plan_build(state, player, &cards, value, None, BuildSource::Stack(stack_id)) {
        Ok(plan) => Ok(StagingPlan::Finalize(plan)),
        Err(reason @ RuleViolation::NoPartition(_)) => disband(state, player, stack, reason),
        Err(other) => Err(other),
    }
}

pub fn validate_confirm_trail(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    let stack = own_stack(state, player, stack_id)?;
    let card = match stack.hand_card() {
        Some(card) if stack.is_pending_trail() => card,
        _ => return Err(RuleViolation::NotAPendingTrail(stack_id)),
    };
    if let Some(existing) = state.table.loose_with_rank(card.rank) {
        return Err(RuleViolation::DuplicateRankOnTable(existing));
    }

    Ok(StagingPlan::ConfirmTrail { stack: stack_id, card })
}

pub fn validate_cancel_stack(
    state: &GameState,
    player: PlayerId,
    stack_id: EntityId,
) -> Result<StagingPlan, RuleViolation> {
    ensure_live(state)?;
    own_stack(state, player, stack_id)?;
    Ok(StagingPlan::Cancel { stack: stack_id })
}

/// Scatter a failed commit. The hand card lands loose, so the move must be
/// one the actor could have made as a trail.
fn disband(
    state: &GameState,
    player: PlayerId,
    stack: &TemporaryStack,
    reason: RuleViolation,
) -> Result<StagingPlan, RuleViolation> {
    if state.round == 1 && state.owned_build(player).is_some() {
        return Err(RuleViolation::TrailWhileOwningBuild);
    }
    if let Some(card) = stack.hand_card() {
        let mut scattered = state.table.loose_cards().chain(stack.cards().filter(|&c| c != card));
        if let Some(existing) = scattered.find(|c| c.rank == card.rank) {
            return Err(RuleViolation::DuplicateRankOnTable(existing));
        }
    }

    Ok(StagingPlan::Disband { stack: stack.id, reason })
}

/// The staged card is where its origin says it is. A hand card may not be
/// the last one able to capture the actor's build.
fn ensure_available(
    state: &GameState,
    player: PlayerId,
    item: StagedCard,
) -> Result<(), RuleViolation> {
    match item.origin {
        Origin::Hand => {
            ensure_in_hand(state, player, item.card)?;
            if keeps_build_covered(state, player, Some(item.card), &[]) {
                Ok(())
            } else {
                Err(RuleViolation::WouldStrandOwnBuild(item.card))
            }
        }
        Origin::Table => {
            if state.table.has_loose(item.card) {
                Ok(())
            } else {
                Err(RuleViolation::CardNotOnTable(item.card))
            }
        }
        Origin::OpponentCapture => match state.opponent_top_card(player) {
            Some(top) if top == item.card => Ok(()),
            Some(_) => Err(RuleViolation::NotOpponentTopCard(item.card)),
            None => Err(RuleViolation::NoOpponentCard),
        },
    }
}

// === Execution ===

pub fn execute_staging(
    state: &mut GameState,
    player: PlayerId,
    plan: &StagingPlan,
) -> Result<Applied, EngineError> {
    match plan {
        StagingPlan::Start { first, second } => {
            take_from_origin(state, player, *first)?;
            take_from_origin(state, player, *second)?;
            let id = state.alloc_entity();
            state
                .table
                .push_stack(TemporaryStack::from_pair(id, player, *first, *second));
            Ok(Applied::turn_continues())
        }

        StagingPlan::Add { stack, item } => {
            take_from_origin(state, player, *item)?;
            let grown = state
                .table
                .stack(*stack)
                .ok_or(EngineError::MissingTableItem(*stack))?
                .with_item(*item);
            state.table.replace_stack(grown)?;
            Ok(Applied::turn_continues())
        }

        StagingPlan::Merge { stack, build } => {
            let staged = state.table.remove_stack(*stack)?;
            fold_into_build(state, *build, staged.cards(), None)?;
            Ok(Applied::turn_continues().with_notice(Notice::info(format!(
                "{} added {} table card(s) to build {}",
                player,
                staged.len(),
                build
            ))))
        }

        StagingPlan::Reinforce {
            stack,
            build,
            stolen_from,
        } => {
            let staged = state.table.remove_stack(*stack)?;
            fold_into_build(state, *build, staged.cards(), Some(player))?;
            let mut applied = Applied::turn_ends();
            if let Some(previous) = stolen_from {
                applied = applied.with_notice(Notice::info(format!(
                    "{} takes over {}'s build {}",
                    player, previous, build
                )));
            }
            Ok(applied)
        }

        StagingPlan::Finalize(build_plan) => execute_build(state, player, build_plan),

        StagingPlan::ConfirmTrail { stack, card } => {
            state.table.remove_stack(*stack)?;
            state.table.push_loose(*card);
            Ok(Applied::turn_ends())
        }

        StagingPlan::Cancel { stack } => {
            let staged = state.table.remove_stack(*stack)?;
            for item in staged.items.iter().rev() {
                match item.origin {
                    Origin::Hand => state.add_to_hand(player, item.card),
                    Origin::Table => state.table.push_loose(item.card),
                    Origin::OpponentCapture => {
                        state.captures[player.opponent()].restore_top_card(item.card)
                    }
                }
            }
            Ok(Applied::turn_continues())
        }

        StagingPlan::Disband { stack, reason } => {
            let staged = state.table.remove_stack(*stack)?;
            for card in staged.cards() {
                state.table.push_loose(card);
            }
            Ok(Applied::turn_ends().with_notice(Notice::new(
                NoticeKind::Disbanded,
                format!("stack {} was broken up: {}", stack, reason),
            )))
        }
    }
}

/// Remove a staged card from its origin.
fn take_from_origin(
    state: &mut GameState,
    player: PlayerId,
    item: StagedCard,
) -> Result<(), EngineError> {
    match item.origin {
        Origin::Hand => state.remove_from_hand(player, item.card),
        Origin::Table => state.table.remove_loose(item.card),
        Origin::OpponentCapture => {
            let pile = &mut state.captures[player.opponent()];
            let top = pile.pop_top_card()?;
            if top == item.card {
                Ok(())
            } else {
                pile.restore_top_card(top);
                Err(EngineError::MissingFromCaptures(item.card))
            }
        }
    }
}

/// Put `cards` on top of a build, locking it. `new_owner` transfers it.
fn fold_into_build(
    state: &mut GameState,
    build_id: EntityId,
    cards: impl IntoIterator<Item = Card>,
    new_owner: Option<PlayerId>,
) -> Result<(), EngineError> {
    let build = state
        .table
        .build(build_id)
        .ok_or(EngineError::MissingTableItem(build_id))?;
    let mut next = build.with_cards_on_top(cards.into_iter().collect::<Vector<Card>>());
    next.extendable = false;
    if let Some(owner) = new_owner {
        next.owner = owner;
    }
    state.table.replace_build(next.capped(state.config.max_build_cards))
}
