//! Reference decision policy.
//!
//! A fixed, deterministic rule set driven by hole cards before the flop and
//! by the evaluated hand category afterwards, made looser in late position.

use pokersim_engine::cards::{Card, Rank};
use pokersim_engine::hand::Category;
use pokersim_engine::player::PlayerAction;
use pokersim_engine::policy::{DecisionContext, DecisionPolicy};
use tracing::trace;

/// Position- and strength-driven heuristic.
///
/// # Strategy
///
/// **Pre-flop:**
/// - Pocket pair: raise 75% of the pot when unopposed, call up to 10% of the stack
/// - Ace, King or Queen: in late position raise half the pot when unopposed or
///   call up to 5% of the stack; elsewhere fold, even when checking is free
/// - Anything else: check if free, fold to any bet
///
/// **Post-flop:**
/// - Three of a kind or better: raise the pot when unopposed, call up to 30% of the stack
/// - Pair or better in late position: raise half the pot, call up to 10% of the stack
/// - Otherwise: check if free, call up to 5% of the stack
///
/// Any call larger than the stack is a fold.
///
/// # Example
///
/// ```rust
/// use pokersim_ai::heuristic::HeuristicPolicy;
/// use pokersim_ai::DecisionPolicy;
///
/// let policy = HeuristicPolicy::new();
/// assert_eq!(policy.name(), "heuristic");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }

    fn preflop(ctx: &DecisionContext<'_>) -> PlayerAction {
        if is_pocket_pair(ctx.hole_cards) {
            return Self::raise_or_call(ctx, ctx.pot * 3 / 4, 10);
        }
        if has_broadway_high(ctx.hole_cards) {
            if ctx.position.is_late() {
                return Self::raise_or_call(ctx, ctx.pot / 2, 5);
            }
            return PlayerAction::Fold;
        }
        ctx.check_or_fold()
    }

    fn postflop(ctx: &DecisionContext<'_>) -> PlayerAction {
        let category = ctx.hand_strength().category;
        if category >= Category::ThreeOfAKind {
            Self::raise_or_call(ctx, ctx.pot, 30)
        } else if category >= Category::Pair && ctx.position.is_late() {
            Self::raise_or_call(ctx, ctx.pot / 2, 10)
        } else if ctx.to_call == 0 {
            PlayerAction::Check
        } else {
            Self::call_within(ctx, 5)
        }
    }

    /// Raise by `chips` when nobody has bet, otherwise call up to
    /// `pct` percent of the stack.
    fn raise_or_call(ctx: &DecisionContext<'_>, chips: u32, pct: u32) -> PlayerAction {
        if ctx.to_call == 0 {
            ctx.raise_by(chips)
        } else {
            Self::call_within(ctx, pct)
        }
    }

    fn call_within(ctx: &DecisionContext<'_>, pct: u32) -> PlayerAction {
        if u64::from(ctx.to_call) * 100 <= u64::from(ctx.stack) * u64::from(pct) {
            PlayerAction::Call(ctx.to_call)
        } else {
            PlayerAction::Fold
        }
    }
}

impl DecisionPolicy for HeuristicPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        if ctx.to_call > ctx.stack {
            trace!(player = ctx.player, to_call = ctx.to_call, "cannot cover the bet");
            return PlayerAction::Fold;
        }
        let action = if ctx.is_preflop() {
            Self::preflop(ctx)
        } else {
            Self::postflop(ctx)
        };
        trace!(player = ctx.player, position = ?ctx.position, ?action, "heuristic decision");
        action
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

fn is_pocket_pair(hole: &[Card]) -> bool {
    matches!(hole, [a, b] if a.rank == b.rank)
}

fn has_broadway_high(hole: &[Card]) -> bool {
    hole.iter()
        .any(|c| matches!(c.rank, Rank::Ace | Rank::King | Rank::Queen))
}
