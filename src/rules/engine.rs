//! The reducer and the `RulesEngine` trait.
//!
//! `reduce` is the only way a game moves forward:
//! - validate the action for the current player,
//! - apply it to a clone of the state,
//! - pass the turn if the action ends it,
//! - run the round controller.
//!
//! The input state is never modified. A rejected action returns a clone of
//! it with a `Rejected` notice; an engine inconsistency returns a clone with
//! an `InternalError` notice.

use tracing::{debug, info, warn};

use super::execute::{execute_build, execute_capture, execute_extend, execute_trail, Applied};
use super::legal::legal_actions;
use super::notice::Notice;
use super::round::advance_round;
use super::staging::{
    execute_staging, validate_add_to_stack, validate_cancel_stack, validate_confirm_trail,
    validate_finalize_stack, validate_merge_stack, validate_reinforce_build, validate_start_stack,
    StagingPlan,
};
use super::validate::{
    validate_capture, validate_create_build, validate_extend_build, validate_trail, BuildPlan,
    CapturePlan, ExtendPlan, TrailPlan,
};
use crate::cards::standard_deck;
use crate::core::{Action, CasinoConfig, EngineError, GameRng, GameState, PlayerId, RuleViolation};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// What `reduce` returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceOutcome {
    /// The next state (equal to the input when `accepted` is false).
    pub state: GameState,
    pub notices: Vec<Notice>,
    pub accepted: bool,
}

impl ReduceOutcome {
    fn unchanged(state: &GameState, notice: Notice) -> Self {
        Self {
            state: state.clone(),
            notices: vec![notice],
            accepted: false,
        }
    }
}

/// Rules engine trait.
///
/// Lets a host hold the engine behind a trait object.
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &CasinoConfig;

    /// Shuffle and deal a new game.
    fn initial_state(&self) -> Result<GameState, EngineError>;

    /// Apply an action for the current player.
    fn reduce(&self, state: &GameState, action: &Action) -> ReduceOutcome;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Candidate actions the current player may take.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        legal_actions(state)
    }
}

/// Casino under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct CasinoRules {
    config: CasinoConfig,
}

impl CasinoRules {
    pub fn new(config: CasinoConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl RulesEngine for CasinoRules {
    fn config(&self) -> &CasinoConfig {
        &self.config
    }

    fn initial_state(&self) -> Result<GameState, EngineError> {
        initialize_game(self.config.clone())
    }

    fn reduce(&self, state: &GameState, action: &Action) -> ReduceOutcome {
        reduce(state, action)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if !state.game_over {
            return None;
        }
        Some(match state.winner {
            Some(player) => GameResult::Winner(player),
            None => GameResult::Draw,
        })
    }
}

/// Shuffle and deal a new game.
///
/// Uses `config.seed` when set, otherwise a seed drawn from entropy.
pub fn initialize_game(config: CasinoConfig) -> Result<GameState, EngineError> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => GameRng::from_entropy().seed(),
    };
    initialize_game_with_seed(config, seed)
}

/// Shuffle with `seed` and deal a new game.
///
/// ```
/// use casino_engine::core::CasinoConfig;
/// use casino_engine::rules::initialize_game_with_seed;
///
/// let a = initialize_game_with_seed(CasinoConfig::default(), 7).unwrap();
/// let b = initialize_game_with_seed(CasinoConfig::default(), 7).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.card_count(), 40);
/// ```
pub fn initialize_game_with_seed(
    config: CasinoConfig,
    seed: u64,
) -> Result<GameState, EngineError> {
    config.validate()?;

    let mut rng = GameRng::new(seed);
    let mut deck = standard_deck();
    rng.shuffle(&mut deck);

    let hand_size = config.hand_size;
    let mut state = GameState::new(config, seed, deck.into_iter().collect());
    state.deal(hand_size)?;

    info!(seed, hand_size, "new game dealt");
    Ok(state)
}

/// Apply `action` for `state.current_player`.
pub fn reduce(state: &GameState, action: &Action) -> ReduceOutcome {
    let player = state.current_player;
    let mut next = state.clone();

    let applied = match apply(&mut next, player, action) {
        Ok(applied) => applied,
        Err(Failure::Rule(violation)) => {
            debug!(
                player = %player,
                action = action.name(),
                reason = %violation,
                "action rejected"
            );
            return ReduceOutcome::unchanged(state, Notice::rejected(&violation));
        }
        Err(Failure::Engine(error)) => {
            warn!(player = %player, action = ?action, error = %error, "engine state out of sync");
            return ReduceOutcome::unchanged(state, Notice::internal(&error));
        }
    };

    next.record_action(player, action.clone());
    if applied.ends_turn {
        next.advance_turn();
    }
    debug!(
        player = %player,
        action = action.name(),
        ends_turn = applied.ends_turn,
        "action accepted"
    );

    let mut notices = applied.notices;
    match advance_round(&mut next) {
        Ok(transition) => notices.extend(transition),
        Err(error) => {
            warn!(round = next.round, error = %error, "round transition failed");
            return ReduceOutcome::unchanged(state, Notice::internal(&error));
        }
    }

    ReduceOutcome {
        state: next,
        notices,
        accepted: true,
    }
}

enum Failure {
    Rule(RuleViolation),
    Engine(EngineError),
}

impl From<RuleViolation> for Failure {
    fn from(violation: RuleViolation) -> Self {
        Failure::Rule(violation)
    }
}

impl From<EngineError> for Failure {
    fn from(error: EngineError) -> Self {
        Failure::Engine(error)
    }
}

/// A validated action, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionPlan {
    Trail(TrailPlan),
    Build(BuildPlan),
    Extend(ExtendPlan),
    Capture(CapturePlan),
    Staging(StagingPlan),
}

/// Check `action` for the current player without applying it.
pub fn validate_action(state: &GameState, action: &Action) -> Result<ActionPlan, RuleViolation> {
    let player = state.current_player;
    let plan = match action {
        Action::Trail { card } => ActionPlan::Trail(validate_trail(state, player, *card)?),
        Action::CreateBuild {
            card,
            table_cards,
            value,
        } => ActionPlan::Build(validate_create_build(state, player, *card, table_cards, *value)?),
        Action::ExtendBuild {
            card,
            build,
            target_value,
        } => ActionPlan::Extend(validate_extend_build(
            state,
            player,
            *card,
            *build,
            *target_value,
        )?),
        Action::Capture { with, targets } => {
            ActionPlan::Capture(validate_capture(state, player, *with, targets)?)
        }
        Action::StartStack { first, second } => {
            ActionPlan::Staging(validate_start_stack(state, player, *first, *second)?)
        }
        Action::AddToStack { stack, item } => {
            ActionPlan::Staging(validate_add_to_stack(state, player, *stack, *item)?)
        }
        Action::MergeStack { stack, build } => {
            ActionPlan::Staging(validate_merge_stack(state, player, *stack, *build)?)
        }
        Action::ReinforceBuild { stack, build } => {
            ActionPlan::Staging(validate_reinforce_build(state, player, *stack, *build)?)
        }
        Action::FinalizeStack { stack, value } => {
            ActionPlan::Staging(validate_finalize_stack(state, player, *stack, *value)?)
        }
        Action::ConfirmTrail { stack } => {
            ActionPlan::Staging(validate_confirm_trail(state, player, *stack)?)
        }
        Action::CancelStack { stack } => {
            ActionPlan::Staging(validate_cancel_stack(state, player, *stack)?)
        }
    };
    Ok(plan)
}

fn execute_plan(
    state: &mut GameState,
    player: PlayerId,
    plan: &ActionPlan,
) -> Result<Applied, EngineError> {
    match plan {
        ActionPlan::Trail(plan) => execute_trail(state, player, plan),
        ActionPlan::Build(plan) => execute_build(state, player, plan),
        ActionPlan::Extend(plan) => execute_extend(state, player, plan),
        ActionPlan::Capture(plan) => execute_capture(state, player, plan),
        ActionPlan::Staging(plan) => execute_staging(state, player, plan),
    }
}

/// Validate against the untouched state, then execute on the clone.
fn apply(state: &mut GameState, player: PlayerId, action: &Action) -> Result<Applied, Failure> {
    let plan = validate_action(state, action)?;
    Ok(execute_plan(state, player, &plan)?)
}
