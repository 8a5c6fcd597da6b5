//! Decision policies: the seam between the betting state machine and whatever
//! chooses actions.
//!
//! The engine owns one boxed [`DecisionPolicy`] and consults it once per turn
//! with a read-only [`DecisionContext`]. Whatever the policy returns is
//! checked by [`crate::rules::validate_action`] before it touches any chips,
//! so a policy can never corrupt the pot.

use std::collections::{HashMap, VecDeque};

use crate::cards::Card;
use crate::hand::{evaluate, HandStrength};
use crate::logger::Street;
use crate::player::{PlayerAction, Position};

/// Everything a policy may look at when it is a player's turn.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub player: &'a str,
    pub street: Street,
    pub hole_cards: &'a [Card],
    pub board: &'a [Card],
    /// Chips needed to match the table bet
    pub to_call: u32,
    pub pot: u32,
    pub stack: u32,
    /// Chips this player already has in on this street
    pub current_bet: u32,
    /// Highest bet on this street
    pub table_bet: u32,
    pub position: Position,
    pub big_blind: u32,
}

impl DecisionContext<'_> {
    pub fn is_preflop(&self) -> bool {
        self.board.is_empty()
    }

    pub fn hand_strength(&self) -> HandStrength {
        evaluate(self.hole_cards, self.board)
    }

    /// `Raise` that puts `chips` more into the pot on top of the call,
    /// limited to what is left in the stack after calling.
    pub fn raise_by(&self, chips: u32) -> PlayerAction {
        let available = self.stack.saturating_sub(self.to_call);
        PlayerAction::Raise(self.table_bet + chips.min(available))
    }

    /// Check when free, call otherwise.
    pub fn check_or_call(&self) -> PlayerAction {
        if self.to_call == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call(self.to_call)
        }
    }

    /// Check when free, fold otherwise.
    pub fn check_or_fold(&self) -> PlayerAction {
        if self.to_call == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        }
    }
}

/// Chooses an action for the player whose turn it is.
pub trait DecisionPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction;

    fn name(&self) -> &str;
}

impl<P: DecisionPolicy + ?Sized> DecisionPolicy for Box<P> {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        (**self).decide(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// What a [`ScriptedPolicy`] does once a player's script runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    #[default]
    CheckOrFold,
    CheckOrCall,
}

/// Plays fixed per-player action lists. Used for deterministic scenarios.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    scripts: HashMap<String, VecDeque<PlayerAction>>,
    fallback: Fallback,
}

impl ScriptedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks when possible and calls everything else. Never raises.
    pub fn passive() -> Self {
        Self::new().with_fallback(Fallback::CheckOrCall)
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Queues actions for `player`, consumed one per turn.
    pub fn script<I>(mut self, player: &str, actions: I) -> Self
    where
        I: IntoIterator<Item = PlayerAction>,
    {
        self.scripts
            .entry(player.to_string())
            .or_default()
            .extend(actions);
        self
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        if let Some(a) = self.scripts.get_mut(ctx.player).and_then(VecDeque::pop_front) {
            return a;
        }
        match self.fallback {
            Fallback::CheckOrFold => ctx.check_or_fold(),
            Fallback::CheckOrCall => ctx.check_or_call(),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(player: &'a str, to_call: u32) -> DecisionContext<'a> {
        DecisionContext {
            player,
            street: Street::Flop,
            hole_cards: &[],
            board: &[],
            to_call,
            pot: 100,
            stack: 500,
            current_bet: 0,
            table_bet: to_call,
            position: Position::Button,
            big_blind: 10,
        }
    }

    #[test]
    fn scripted_actions_are_consumed_in_order() {
        let mut p = ScriptedPolicy::new().script("a", [PlayerAction::Raise(40), PlayerAction::Fold]);
        assert_eq!(p.decide(&ctx("a", 0)), PlayerAction::Raise(40));
        assert_eq!(p.decide(&ctx("a", 20)), PlayerAction::Fold);
        assert_eq!(p.decide(&ctx("a", 20)), PlayerAction::Fold);
        assert_eq!(p.decide(&ctx("a", 0)), PlayerAction::Check);
    }

    #[test]
    fn passive_fallback_calls() {
        let mut p = ScriptedPolicy::passive();
        assert_eq!(p.decide(&ctx("b", 30)), PlayerAction::Call(30));
        assert_eq!(p.decide(&ctx("b", 0)), PlayerAction::Check);
    }

    #[test]
    fn raise_by_is_capped_by_stack_after_calling() {
        let c = DecisionContext {
            stack: 50,
            to_call: 20,
            table_bet: 20,
            ..ctx("c", 20)
        };
        assert_eq!(c.raise_by(500), PlayerAction::Raise(50));
        assert_eq!(c.raise_by(10), PlayerAction::Raise(30));
    }
}
