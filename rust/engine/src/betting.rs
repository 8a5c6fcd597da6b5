//! One street of betting.
//!
//! Seats waiting to act sit in a queue. A raise re-queues every other active
//! seat in acting order after the raiser, so anyone who already acted must
//! act again. The street ends when the queue drains (action has come back
//! around and every active player matches the table bet) or as soon as fewer
//! than two players are still in. All-in players keep their claim on the
//! pot but are never asked to act again.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::cards::Card;
use crate::events::{EventBus, GameEvent};
use crate::logger::{ActionRecord, Street};
use crate::player::{Player, PlayerAction};
use crate::policy::{DecisionContext, DecisionPolicy};
use crate::rules::{validate_action, ValidatedAction};
use crate::stats::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Everyone still in has matched the table bet
    Complete,
    /// Fewer than two players remain; skip to resolution
    EarlyEnd,
}

/// Mutable hand state a betting round works on, borrowed from the engine.
pub struct RoundEnv<'a> {
    pub players: &'a mut [Player],
    pub pot: &'a mut u32,
    pub board: &'a [Card],
    pub big_blind: u32,
    pub policy: &'a mut dyn DecisionPolicy,
    pub stats: &'a mut Statistics,
    pub events: &'a mut EventBus,
    pub actions: &'a mut Vec<ActionRecord>,
}

impl RoundEnv<'_> {
    fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    /// All seats in acting order, starting with the first to act
    order: Vec<usize>,
    to_act: VecDeque<usize>,
    table_bet: u32,
    min_raise: u32,
    raises: u32,
    max_raises: u32,
}

impl BettingRound {
    /// `order` lists every seat once beginning with the seat that opens the
    /// street. `table_bet` is the bet already standing (the big blind
    /// pre-flop, zero afterwards).
    pub fn new(
        street: Street,
        order: Vec<usize>,
        players: &[Player],
        table_bet: u32,
        big_blind: u32,
        max_raises: u32,
    ) -> Self {
        let to_act = order
            .iter()
            .copied()
            .filter(|&s| can_act(&players[s]))
            .collect();
        Self {
            street,
            order,
            to_act,
            table_bet,
            min_raise: big_blind.max(1),
            raises: 0,
            max_raises,
        }
    }

    pub fn table_bet(&self) -> u32 {
        self.table_bet
    }

    pub fn raises(&self) -> u32 {
        self.raises
    }

    pub fn run(&mut self, env: &mut RoundEnv<'_>) -> RoundOutcome {
        loop {
            if env.active_count() < 2 {
                return RoundOutcome::EarlyEnd;
            }
            let Some(seat) = self.to_act.pop_front() else {
                return RoundOutcome::Complete;
            };
            if !can_act(&env.players[seat]) {
                continue;
            }
            self.take_turn(seat, env);
        }
    }

    fn take_turn(&mut self, seat: usize, env: &mut RoundEnv<'_>) {
        let player = &env.players[seat];
        let ctx = DecisionContext {
            player: player.name(),
            street: self.street,
            hole_cards: player.hole_cards(),
            board: env.board,
            to_call: self.table_bet.saturating_sub(player.current_bet()),
            pot: *env.pot,
            stack: player.stack(),
            current_bet: player.current_bet(),
            table_bet: self.table_bet,
            position: player.position(),
            big_blind: env.big_blind,
        };
        let chosen = env.policy.decide(&ctx);
        let validated = validate_action(
            ctx.stack,
            ctx.current_bet,
            self.table_bet,
            self.min_raise,
            self.raises < self.max_raises,
            chosen,
        )
        .unwrap_or_else(|e| {
            warn!(player = ctx.player, ?chosen, error = %e, "rejected action, folding");
            ValidatedAction::Fold
        });
        trace!(player = ctx.player, street = %self.street, ?chosen, ?validated, "turn");
        self.apply(seat, validated, env);
    }

    fn apply(&mut self, seat: usize, action: ValidatedAction, env: &mut RoundEnv<'_>) {
        let street = self.street;
        let player = &mut env.players[seat];
        let name = player.name().to_string();

        let applied = match action {
            ValidatedAction::Fold => {
                player.fold();
                env.stats.record_fold(&name);
                env.events.emit(GameEvent::Fold {
                    player: name.clone(),
                    street,
                });
                PlayerAction::Fold
            }
            ValidatedAction::Check => {
                env.stats.record_check(&name);
                env.events.emit(GameEvent::Check {
                    player: name.clone(),
                    street,
                });
                PlayerAction::Check
            }
            ValidatedAction::Call(amount) => {
                if let Err(e) = player.commit(amount) {
                    warn!(player = %name, error = %e, "call could not be paid, folding");
                    return self.apply(seat, ValidatedAction::Fold, env);
                }
                *env.pot += amount;
                let all_in = player.stack() == 0;
                env.stats.record_call(&name, all_in);
                env.events.emit(GameEvent::Call {
                    player: name.clone(),
                    street,
                    amount,
                    pot: *env.pot,
                    all_in,
                });
                PlayerAction::Call(amount)
            }
            ValidatedAction::Raise { to, chips } => {
                if let Err(e) = player.commit(chips) {
                    warn!(player = %name, error = %e, "raise could not be paid, folding");
                    return self.apply(seat, ValidatedAction::Fold, env);
                }
                *env.pot += chips;
                let all_in = player.stack() == 0;
                self.min_raise = self.min_raise.max(to - self.table_bet);
                self.table_bet = to;
                self.raises += 1;
                self.reopen_after(seat, env.players);
                env.stats.record_raise(&name, all_in);
                env.events.emit(GameEvent::Raise {
                    player: name.clone(),
                    street,
                    to,
                    amount: chips,
                    pot: *env.pot,
                    all_in,
                });
                PlayerAction::Raise(to)
            }
        };
        env.actions.push(ActionRecord {
            player: name,
            street,
            action: applied,
        });
    }

    /// Everyone else still in must respond to the raise, in seat order.
    fn reopen_after(&mut self, raiser: usize, players: &[Player]) {
        let at = self.order.iter().position(|&s| s == raiser).unwrap_or(0);
        let n = self.order.len();
        self.to_act = (1..n)
            .map(|i| self.order[(at + i) % n])
            .filter(|&s| can_act(&players[s]))
            .collect();
    }
}

fn can_act(p: &Player) -> bool {
    p.is_active() && p.stack() > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScriptedPolicy;

    struct Fixture {
        players: Vec<Player>,
        pot: u32,
        stats: Statistics,
        events: EventBus,
        actions: Vec<ActionRecord>,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            Self {
                players: (1..=n).map(|i| Player::new(format!("P{}", i), 100)).collect(),
                pot: 0,
                stats: Statistics::default(),
                events: EventBus::default(),
                actions: Vec::new(),
            }
        }

        fn run(&mut self, policy: &mut ScriptedPolicy, max_raises: u32) -> RoundOutcome {
            let order: Vec<usize> = (0..self.players.len()).collect();
            let mut round = BettingRound::new(Street::Flop, order, &self.players, 0, 10, max_raises);
            let mut env = RoundEnv {
                players: &mut self.players,
                pot: &mut self.pot,
                board: &[],
                big_blind: 10,
                policy,
                stats: &mut self.stats,
                events: &mut self.events,
                actions: &mut self.actions,
            };
            round.run(&mut env)
        }
    }

    #[test]
    fn everyone_checks_once() {
        let mut f = Fixture::new(3);
        let mut policy = ScriptedPolicy::passive();
        assert_eq!(f.run(&mut policy, 4), RoundOutcome::Complete);
        assert_eq!(f.actions.len(), 3);
        assert!(f.actions.iter().all(|a| a.action == PlayerAction::Check));
    }

    #[test]
    fn raise_reopens_action_for_earlier_seats() {
        let mut f = Fixture::new(3);
        let mut policy = ScriptedPolicy::passive().script("P2", [PlayerAction::Raise(20)]);
        assert_eq!(f.run(&mut policy, 4), RoundOutcome::Complete);
        let who: Vec<&str> = f.actions.iter().map(|a| a.player.as_str()).collect();
        assert_eq!(who, ["P1", "P2", "P3", "P1"]);
        assert_eq!(f.pot, 60);
        assert!(f.players.iter().all(|p| p.current_bet() == 20));
    }

    #[test]
    fn folds_down_to_one_end_early() {
        let mut f = Fixture::new(4);
        let mut policy = ScriptedPolicy::new()
            .script("P1", [PlayerAction::Raise(30)])
            .script("P2", [PlayerAction::Fold])
            .script("P3", [PlayerAction::Fold])
            .script("P4", [PlayerAction::Fold]);
        assert_eq!(f.run(&mut policy, 4), RoundOutcome::EarlyEnd);
        assert_eq!(f.actions.len(), 4);
        assert_eq!(f.players.iter().filter(|p| p.is_active()).count(), 1);
    }

    #[test]
    fn raise_cap_forces_termination() {
        struct Maniac;
        impl DecisionPolicy for Maniac {
            fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
                ctx.raise_by(ctx.big_blind)
            }
            fn name(&self) -> &str {
                "maniac"
            }
        }
        let mut f = Fixture::new(2);
        let order = vec![0, 1];
        let mut round = BettingRound::new(Street::Turn, order, &f.players, 0, 10, 3);
        let mut policy = Maniac;
        let mut env = RoundEnv {
            players: &mut f.players,
            pot: &mut f.pot,
            board: &[],
            big_blind: 10,
            policy: &mut policy,
            stats: &mut f.stats,
            events: &mut f.events,
            actions: &mut f.actions,
        };
        assert_eq!(round.run(&mut env), RoundOutcome::Complete);
        assert_eq!(round.raises(), 3);
        assert_eq!(round.table_bet(), 30);
        assert_eq!(f.players[0].current_bet(), f.players[1].current_bet());
    }

    #[test]
    fn all_in_player_is_not_asked_again() {
        let mut f = Fixture::new(3);
        let mut policy = ScriptedPolicy::passive()
            .script("P1", [PlayerAction::Raise(100)])
            .script("P2", [PlayerAction::Raise(100)]);
        assert_eq!(f.run(&mut policy, 4), RoundOutcome::Complete);
        let who: Vec<&str> = f.actions.iter().map(|a| a.player.as_str()).collect();
        assert_eq!(who, ["P1", "P2", "P3"]);
        assert_eq!(f.pot, 300);
        assert!(f.players.iter().all(|p| p.is_active() && p.stack() == 0));
    }

    #[test]
    fn illegal_check_is_a_fold() {
        let mut f = Fixture::new(2);
        let mut policy = ScriptedPolicy::new()
            .script("P1", [PlayerAction::Raise(10)])
            .script("P2", [PlayerAction::Check]);
        assert_eq!(f.run(&mut policy, 4), RoundOutcome::EarlyEnd);
        assert!(f.players[1].folded());
        assert_eq!(f.stats.get("P2").unwrap().fold_count, 1);
    }
}
