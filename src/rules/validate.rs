//! Action validators.
//!
//! Each validator is a pure check of one action against a state. On success
//! it returns a *plan*: the facts the executor needs (resolved value,
//! extendability, consolidation targets) so nothing is computed twice. On
//! failure it returns the `RuleViolation` that forbids the action.
//!
//! Staging validators live in `rules::staging`; the helpers at the bottom of
//! this file are shared with them.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::partition::{partition, partition_exists};
use crate::cards::{Card, Origin, TemporaryStack};
use crate::core::{CaptureTarget, Capturer, EntityId, GameState, PlayerId, RuleViolation};

/// An accepted trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailPlan {
    pub card: Card,
    /// Round-2 trails wait in a single-card stack for confirmation.
    pub staged: bool,
}

/// Where the cards of a new build come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildSource {
    /// A hand card dropped on loose table cards.
    Hand {
        card: Card,
        table_cards: SmallVec<[Card; 4]>,
    },
    /// A finalized staging stack.
    Stack(EntityId),
}

/// An accepted build creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPlan {
    pub source: BuildSource,
    pub value: u8,
    /// True only for a single combination with nothing consolidated.
    pub extendable: bool,
    /// The actor's existing build of the same value, which absorbs the
    /// new cards instead of a second build being created.
    pub consolidate_into: Option<EntityId>,
    /// Loose table cards of the build's value that join it automatically.
    pub absorbed_loose: Vec<Card>,
}

/// An accepted reinforcement or increase of an existing build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendPlan {
    pub card: Card,
    pub build: EntityId,
    pub value: u8,
    pub extendable: bool,
    /// Previous owner when the build changes hands.
    pub stolen_from: Option<PlayerId>,
}

/// An accepted capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturePlan {
    pub with: Capturer,
    pub capturing_card: Card,
    pub targets: Vec<CaptureTarget>,
}

/// Check a trail.
pub fn validate_trail(
    state: &GameState,
    player: PlayerId,
    card: Card,
) -> Result<TrailPlan, RuleViolation> {
    ensure_live(state)?;
    ensure_in_hand(state, player, card)?;
    ensure_not_staging(state, player)?;

    if state.round == 1 && state.owned_build(player).is_some() {
        return Err(RuleViolation::TrailWhileOwningBuild);
    }
    if let Some(existing) = state.table.loose_with_rank(card.rank) {
        return Err(RuleViolation::DuplicateRankOnTable(existing));
    }
    if !keeps_build_covered(state, player, Some(card), &[]) {
        return Err(RuleViolation::WouldStrandOwnBuild(card));
    }

    Ok(TrailPlan {
        card,
        staged: state.round >= 2,
    })
}

/// Check a build made by dropping a hand card on loose table cards.
pub fn validate_create_build(
    state: &GameState,
    player: PlayerId,
    card: Card,
    table_cards: &[Card],
    value: u8,
) -> Result<BuildPlan, RuleViolation> {
    ensure_live(state)?;
    ensure_in_hand(state, player, card)?;
    ensure_not_staging(state, player)?;

    let mut all_cards = Vec::with_capacity(table_cards.len() + 1);
    all_cards.extend_from_slice(table_cards);
    all_cards.push(card);
    ensure_distinct(&all_cards)?;
    for &c in table_cards {
        if !state.table.has_loose(c) {
            return Err(RuleViolation::CardNotOnTable(c));
        }
    }

    plan_build(
        state,
        player,
        &all_cards,
        value,
        Some(card),
        BuildSource::Hand {
            card,
            table_cards: SmallVec::from_slice(table_cards),
        },
    )
}

/// Shared checks for every new build, from hand or from a staging stack.
///
/// `spent` is the hand card being played if it is still in hand. The
/// partition check runs last so callers can tell a failed composition
/// (`NoPartition`) from every other rejection.
pub(crate) fn plan_build(
    state: &GameState,
    player: PlayerId,
    all_cards: &[Card],
    value: u8,
    spent: Option<Card>,
    source: BuildSource,
) -> Result<BuildPlan, RuleViolation> {
    check_build_value(state, value)?;
    if all_cards.len() < 2 {
        return Err(RuleViolation::EmptyBuild);
    }
    if state
        .owned_build(player.opponent())
        .is_some_and(|b| b.value == value)
    {
        return Err(RuleViolation::OpponentBuildSameValue(value));
    }
    let own = state.owned_build(player);
    if own.is_some_and(|b| b.value != value) {
        return Err(RuleViolation::AlreadyOwnBuild);
    }
    if !holds_capture_card(state, player, value, spent) {
        return Err(RuleViolation::NoCaptureCard(value));
    }

    let grouping = partition(all_cards, value);
    if !grouping.is_covered() {
        return Err(RuleViolation::NoPartition(value));
    }

    let absorbed_loose: Vec<Card> = state
        .table
        .loose_cards()
        .filter(|c| c.value() == value && !all_cards.contains(c))
        .collect();
    let consolidate_into = own.map(|b| b.id);

    Ok(BuildPlan {
        source,
        value,
        extendable: grouping.is_single() && absorbed_loose.is_empty() && consolidate_into.is_none(),
        consolidate_into,
        absorbed_loose,
    })
}

/// Check adding a hand card to a build (own or opponent's).
///
/// `target_value == build.value` reinforces; `target_value == build.value +
/// card.value` increases. Anything else is rejected.
pub fn validate_extend_build(
    state: &GameState,
    player: PlayerId,
    card: Card,
    build_id: EntityId,
    target_value: u8,
) -> Result<ExtendPlan, RuleViolation> {
    ensure_live(state)?;
    ensure_in_hand(state, player, card)?;
    ensure_not_staging(state, player)?;

    let build = state
        .table
        .build(build_id)
        .ok_or(RuleViolation::BuildNotFound(build_id))?;
    let stealing = build.owner != player;

    if stealing && state.owned_build(player).is_some() {
        return Err(RuleViolation::AlreadyOwnBuild);
    }
    check_build_value(state, target_value)?;

    let reinforcing = target_value == build.value;
    if reinforcing {
        if card.value() != build.value {
            return Err(RuleViolation::InvalidBuildTarget {
                card,
                build: build_id,
                target: target_value,
            });
        }
    } else if u16::from(target_value) != u16::from(build.value) + u16::from(card.value()) {
        return Err(RuleViolation::InvalidBuildTarget {
            card,
            build: build_id,
            target: target_value,
        });
    }
    if (stealing || !reinforcing) && !build.extendable {
        return Err(RuleViolation::BuildNotExtendable(build_id));
    }
    if state
        .table
        .builds()
        .any(|b| b.id != build_id && b.owner != player && b.value == target_value)
    {
        return Err(RuleViolation::OpponentBuildSameValue(target_value));
    }
    if !holds_capture_card(state, player, target_value, Some(card)) {
        return Err(RuleViolation::NoCaptureCard(target_value));
    }

    let extendable = !reinforcing && build.len() + 1 < state.config.max_build_cards;
    Ok(ExtendPlan {
        card,
        build: build_id,
        value: target_value,
        extendable,
        stolen_from: stealing.then_some(build.owner),
    })
}

/// Check a capture.
pub fn validate_capture(
    state: &GameState,
    player: PlayerId,
    with: Capturer,
    targets: &[CaptureTarget],
) -> Result<CapturePlan, RuleViolation> {
    ensure_live(state)?;

    let mut pooled: Vec<Card> = Vec::new();
    let mut opponent_cards = 0;
    let (capturing_card, spent) = match with {
        Capturer::Hand(card) => {
            ensure_in_hand(state, player, card)?;
            (card, Some(card))
        }
        Capturer::Stack(id) => {
            let stack = own_stack(state, player, id)?;
            let hand_card = stack.hand_card().ok_or(RuleViolation::StackNeedsHandCard(id))?;
            pooled.extend(stack.non_hand_cards());
            opponent_cards += opponent_items(stack);
            (hand_card, None)
        }
    };

    if let Some(open) = state.open_stack(player) {
        let consumed = with == Capturer::Stack(open.id)
            || targets.contains(&CaptureTarget::Stack(open.id));
        if !consumed {
            return Err(RuleViolation::StagingInProgress);
        }
    }

    let mut seen = FxHashSet::default();
    if !targets.iter().all(|t| seen.insert(*t)) {
        return Err(RuleViolation::DuplicateTarget);
    }

    let value = capturing_card.value();
    let mut builds = Vec::new();
    for &target in targets {
        match target {
            CaptureTarget::Loose(c) => {
                if !state.table.has_loose(c) {
                    return Err(RuleViolation::CardNotOnTable(c));
                }
                pooled.push(c);
            }
            CaptureTarget::Build(id) => {
                let build = state.table.build(id).ok_or(RuleViolation::BuildNotFound(id))?;
                if build.value != value {
                    return Err(RuleViolation::BuildValueMismatch {
                        card: capturing_card,
                        build_value: build.value,
                    });
                }
                builds.push(id);
            }
            CaptureTarget::Stack(id) => {
                if with == Capturer::Stack(id) {
                    return Err(RuleViolation::DuplicateTarget);
                }
                let stack = own_stack(state, player, id)?;
                if stack.hand_count() > 0 {
                    return Err(RuleViolation::CaptureStagedHandCard(id));
                }
                pooled.extend(stack.cards());
                opponent_cards += opponent_items(stack);
            }
            CaptureTarget::OpponentTop => {
                let top = state
                    .opponent_top_card(player)
                    .ok_or(RuleViolation::NoOpponentCard)?;
                pooled.push(top);
                opponent_cards += 1;
            }
        }
    }

    if opponent_cards > 1 {
        return Err(RuleViolation::SecondOpponentCard);
    }
    if pooled.is_empty() && builds.is_empty() {
        return Err(RuleViolation::NothingToCapture);
    }
    if !partition_exists(&pooled, value) {
        return Err(RuleViolation::NoPartition(value));
    }
    if !keeps_build_covered(state, player, spent, &builds) {
        return Err(RuleViolation::WouldStrandOwnBuild(capturing_card));
    }

    Ok(CapturePlan {
        with,
        capturing_card,
        targets: targets.to_vec(),
    })
}

// === Shared helpers ===

pub(crate) fn ensure_live(state: &GameState) -> Result<(), RuleViolation> {
    if state.game_over {
        Err(RuleViolation::GameOver)
    } else {
        Ok(())
    }
}

pub(crate) fn ensure_in_hand(
    state: &GameState,
    player: PlayerId,
    card: Card,
) -> Result<(), RuleViolation> {
    if state.has_in_hand(player, card) {
        Ok(())
    } else {
        Err(RuleViolation::CardNotInHand(card))
    }
}

/// Turn-ending actions that do not consume the open stack are refused.
pub(crate) fn ensure_not_staging(state: &GameState, player: PlayerId) -> Result<(), RuleViolation> {
    match state.open_stack(player) {
        Some(_) => Err(RuleViolation::StagingInProgress),
        None => Ok(()),
    }
}

pub(crate) fn ensure_distinct(cards: &[Card]) -> Result<(), RuleViolation> {
    let mut seen = FxHashSet::default();
    for &c in cards {
        if !seen.insert(c) {
            return Err(RuleViolation::DuplicateCard(c));
        }
    }
    Ok(())
}

pub(crate) fn check_build_value(state: &GameState, value: u8) -> Result<(), RuleViolation> {
    let max = state.config.max_build_value;
    if value == 0 {
        Err(RuleViolation::BuildValueTooLow)
    } else if value > max {
        Err(RuleViolation::BuildValueTooHigh { value, max })
    } else {
        Ok(())
    }
}

/// The actor's own stack with the given ID.
pub(crate) fn own_stack(
    state: &GameState,
    player: PlayerId,
    id: EntityId,
) -> Result<&TemporaryStack, RuleViolation> {
    let stack = state.table.stack(id).ok_or(RuleViolation::StackNotFound(id))?;
    if stack.owner != player {
        return Err(RuleViolation::NotYourStack(id));
    }
    Ok(stack)
}

/// Whether `player` keeps a hand card of `value` after spending `spent`.
pub(crate) fn holds_capture_card(
    state: &GameState,
    player: PlayerId,
    value: u8,
    spent: Option<Card>,
) -> bool {
    state
        .hand(player)
        .iter()
        .any(|&c| Some(c) != spent && c.value() == value)
}

/// Whether the actor's build (if any, and not being captured) can still be
/// taken after spending `spent`.
pub(crate) fn keeps_build_covered(
    state: &GameState,
    player: PlayerId,
    spent: Option<Card>,
    captured_builds: &[EntityId],
) -> bool {
    match state.owned_build(player) {
        Some(build) if !captured_builds.contains(&build.id) => {
            holds_capture_card(state, player, build.value, spent)
        }
        _ => true,
    }
}

fn opponent_items(stack: &TemporaryStack) -> usize {
    stack
        .items
        .iter()
        .filter(|i| i.origin == Origin::OpponentCapture)
        .count()
}
