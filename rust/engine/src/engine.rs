use tracing::{debug, warn};

use crate::betting::{BettingRound, RoundEnv, RoundOutcome};
use crate::cards::{format_cards, Card};
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{EventBus, GameEvent};
use crate::game::Seating;
use crate::hand::{evaluate, HandStrength};
use crate::logger::{format_hand_id, ActionRecord, HandRecord, PlayerSnapshot, Street, WinnerRecord};
use crate::player::Player;
use crate::policy::DecisionPolicy;
use crate::stats::Statistics;

/// Chips awarded to one winner of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub seat: usize,
    pub player: String,
    pub amount: u32,
    /// `None` when the pot was won uncontested
    pub hand: Option<HandStrength>,
}

/// Outcome of [`Engine::play_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub hand_number: u64,
    pub pot: u32,
    pub board: Vec<Card>,
    pub winners: Vec<Payout>,
    /// Street on which the hand stopped; `Showdown` when hands were compared
    pub ended_on: Street,
}

impl HandResult {
    pub fn went_to_showdown(&self) -> bool {
        self.ended_on == Street::Showdown
    }

    pub fn total_paid(&self) -> u32 {
        self.winners.iter().map(|w| w.amount).sum()
    }
}

/// Hand orchestrator for a 2 to 9 seat table.
///
/// Owns the deck, the players, the pot and the session statistics. Each call
/// to [`Engine::play_hand`] runs one hand to completion: button rotation,
/// blinds, hole cards, up to four betting rounds and pot resolution.
///
/// # Examples
///
/// ```
/// use pokersim_engine::config::TableConfig;
/// use pokersim_engine::engine::Engine;
/// use pokersim_engine::policy::ScriptedPolicy;
///
/// let config = TableConfig { num_players: 3, seed: Some(7), ..TableConfig::default() };
/// let mut engine = Engine::new(config, Box::new(ScriptedPolicy::passive())).unwrap();
/// let before = engine.total_chips();
///
/// let result = engine.play_hand();
/// assert!(result.went_to_showdown());
/// assert_eq!(result.total_paid(), result.pot);
/// assert_eq!(engine.total_chips(), before);
/// ```
pub struct Engine {
    config: TableConfig,
    deck: Deck,
    players: Vec<Player>,
    seating: Seating,
    board: Vec<Card>,
    pot: u32,
    hand_number: u64,
    stats: Statistics,
    policy: Box<dyn DecisionPolicy>,
    events: EventBus,
    actions: Vec<ActionRecord>,
}

impl Engine {
    pub fn new(config: TableConfig, policy: Box<dyn DecisionPolicy>) -> Result<Self, GameError> {
        config.validate()?;
        let deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        };
        let players = (1..=config.num_players)
            .map(|i| Player::new(format!("Player {}", i), config.initial_stack))
            .collect();
        Ok(Self {
            seating: Seating::new(config.num_players),
            config,
            deck,
            players,
            board: Vec::with_capacity(5),
            pot: 0,
            hand_number: 0,
            stats: Statistics::default(),
            policy,
            events: EventBus::default(),
            actions: Vec::new(),
        })
    }

    /// Registers the single event observer, replacing any previous one.
    pub fn set_event_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.set(callback);
    }

    pub fn clear_event_callback(&mut self) {
        self.events.clear();
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn button(&self) -> usize {
        self.seating.button()
    }
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
    /// Actions applied so far in the current (or last) hand.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Chips on the table: every stack plus the pot.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.stack())).sum::<u64>() + u64::from(self.pot)
    }

    /// Plays one hand to completion and returns who won what.
    pub fn play_hand(&mut self) -> HandResult {
        self.start_hand();
        self.post_blinds();
        self.deal_hole_cards();
        let ended_on = self.run_streets();
        let result = self.resolve(ended_on);
        self.events.emit(GameEvent::HandComplete {
            hand: self.hand_number,
            street: ended_on,
            pot: result.pot,
        });
        debug!(
            hand = self.hand_number,
            street = %ended_on,
            pot = result.pot,
            winners = result.winners.len(),
            "hand complete"
        );
        result
    }

    /// Plays `hands` hands, handing each result to `on_hand` as it finishes.
    pub fn run_simulation<F>(&mut self, hands: u64, mut on_hand: F)
    where
        F: FnMut(&Engine, &HandResult),
    {
        for _ in 0..hands {
            let result = self.play_hand();
            on_hand(&*self, &result);
        }
    }

    /// Builds the hand-log line for a finished hand.
    pub fn hand_record(&self, session: &str, result: &HandResult) -> HandRecord {
        HandRecord {
            hand_id: format_hand_id(session, result.hand_number),
            seed: self.config.seed,
            community_cards: format_cards(&result.board),
            pot_size: result.pot,
            winners: result
                .winners
                .iter()
                .map(|w| WinnerRecord {
                    player: w.player.clone(),
                    winnings: w.amount,
                    hole_cards: format_cards(self.players[w.seat].hole_cards()),
                })
                .collect(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name().to_string(),
                    hole_cards: format_cards(p.hole_cards()),
                    stack: p.stack(),
                    folded: p.folded(),
                    is_active: p.is_active(),
                })
                .collect(),
            actions: self.actions.clone(),
            ended_on: result.ended_on,
            ts: None,
        }
    }

    /// Deals the flop (three cards, or four on a four-card-flop table).
    /// An exhausted deck deals fewer cards.
    pub fn deal_flop(&mut self) {
        self.reveal(Street::Flop, self.config.flop_size());
    }

    pub fn deal_turn(&mut self) {
        self.reveal(Street::Turn, 1);
    }

    pub fn deal_river(&mut self) {
        self.reveal(Street::River, 1);
    }

    fn reveal(&mut self, street: Street, n: usize) {
        let cards: Vec<Card> = (0..n).filter_map(|_| self.deck.draw().ok()).collect();
        if cards.len() < n {
            warn!(%street, wanted = n, dealt = cards.len(), "deck exhausted");
        }
        self.board.extend_from_slice(&cards);
        self.events.emit(GameEvent::Community {
            street,
            cards,
            board: self.board.clone(),
        });
    }

    fn start_hand(&mut self) {
        self.hand_number += 1;
        self.seating.rotate_button();
        self.seating.sync_positions(&mut self.players);
        self.board.clear();
        self.pot = 0;
        self.actions.clear();
        for p in &mut self.players {
            p.reset_hand();
            if p.rebuy_if_bust(self.config.initial_stack) {
                self.stats.record_rebuy(p.name());
                self.events.emit(GameEvent::StackReset {
                    player: p.name().to_string(),
                    amount: self.config.initial_stack,
                });
            }
            self.stats.record_hand_played(p.name());
        }
        self.deck.reset();
        debug!(hand = self.hand_number, button = self.seating.button(), "hand started");
    }

    /// Short stacks post whatever they have left.
    fn post_blinds(&mut self) {
        let sb_seat = self.seating.small_blind_seat();
        let bb_seat = self.seating.big_blind_seat();
        let sb = self.post(sb_seat, self.config.small_blind);
        self.events.emit(GameEvent::SmallBlind {
            player: self.players[sb_seat].name().to_string(),
            amount: sb,
            pot: self.pot,
        });
        let bb = self.post(bb_seat, self.config.big_blind);
        self.events.emit(GameEvent::BigBlind {
            player: self.players[bb_seat].name().to_string(),
            amount: bb,
            pot: self.pot,
        });
    }

    fn post(&mut self, seat: usize, blind: u32) -> u32 {
        let p = &mut self.players[seat];
        let amount = blind.min(p.stack());
        match p.commit(amount) {
            Ok(()) => {
                self.pot += amount;
                amount
            }
            Err(e) => {
                warn!(player = p.name(), error = %e, "blind not posted");
                0
            }
        }
    }

    /// Two rounds of one card each, in seat order, to every active player.
    fn deal_hole_cards(&mut self) {
        for _ in 0..2 {
            for p in self.players.iter_mut().filter(|p| p.is_active()) {
                let Ok(card) = self.deck.draw() else {
                    warn!("deck exhausted while dealing hole cards");
                    break;
                };
                if let Err(e) = p.give_card(card) {
                    warn!(player = p.name(), error = %e, "hole card not dealt");
                }
            }
        }
        for p in self.players.iter().filter(|p| p.is_active()) {
            self.events.emit(GameEvent::Deal {
                player: p.name().to_string(),
                cards: p.hole_cards().to_vec(),
            });
        }
    }

    /// Runs pre-flop through river; returns the street where play stopped.
    fn run_streets(&mut self) -> Street {
        if self.betting_round(Street::Preflop) == RoundOutcome::EarlyEnd {
            return Street::Preflop;
        }
        for street in [Street::Flop, Street::Turn, Street::River] {
            match street {
                Street::Flop => self.deal_flop(),
                Street::Turn => self.deal_turn(),
                _ => self.deal_river(),
            }
            if self.betting_round(street) == RoundOutcome::EarlyEnd {
                return street;
            }
        }
        Street::Showdown
    }

    fn betting_round(&mut self, street: Street) -> RoundOutcome {
        if street != Street::Preflop {
            for p in &mut self.players {
                p.reset_street();
            }
        }
        let start = self.seating.first_to_act();
        let table_bet = self.players.iter().map(Player::current_bet).max().unwrap_or(0);
        let order: Vec<usize> = self.seating.order_from(start).collect();
        let mut round = BettingRound::new(
            street,
            order,
            &self.players,
            table_bet,
            self.config.big_blind,
            self.config.max_raises_per_street,
        );
        let mut env = RoundEnv {
            players: &mut self.players,
            pot: &mut self.pot,
            board: &self.board,
            big_blind: self.config.big_blind,
            policy: self.policy.as_mut(),
            stats: &mut self.stats,
            events: &mut self.events,
            actions: &mut self.actions,
        };
        let outcome = round.run(&mut env);
        debug!(hand = self.hand_number, %street, ?outcome, pot = self.pot, "betting round over");
        outcome
    }

    /// Awards the pot. Tied winners split it evenly; leftover chips go one
    /// at a time to the tied winners nearest the button's left.
    fn resolve(&mut self, ended_on: Street) -> HandResult {
        let pot = self.pot;
        let contenders: Vec<usize> = self
            .seating
            .order_from(self.seating.left_of_button())
            .filter(|&s| self.players[s].is_active())
            .collect();

        let winners: Vec<(usize, Option<HandStrength>)> = match contenders.as_slice() {
            [] => {
                warn!(hand = self.hand_number, pot, "no contenders left, pot unclaimed");
                Vec::new()
            }
            [only] => vec![(*only, None)],
            _ => {
                let mut ranked: Vec<(usize, HandStrength)> = contenders
                    .iter()
                    .map(|&s| (s, evaluate(self.players[s].hole_cards(), &self.board)))
                    .collect();
                for (s, h) in &ranked {
                    self.stats.record_showdown_hand(self.players[*s].name(), h);
                }
                // stable: tied hands keep their seat order
                ranked.sort_by(|a, b| b.1.cmp(&a.1));
                let best = ranked[0].1.clone();
                ranked
                    .into_iter()
                    .take_while(|(_, h)| *h == best)
                    .map(|(s, h)| (s, Some(h)))
                    .collect()
            }
        };

        let shares = split_pot(pot, winners.len());
        let mut payouts = Vec::with_capacity(winners.len());
        for ((seat, hand), amount) in winners.into_iter().zip(shares) {
            let p = &mut self.players[seat];
            p.add_chips(amount);
            self.pot -= amount;
            self.stats.record_win(p.name());
            self.events.emit(GameEvent::Win {
                player: p.name().to_string(),
                amount,
                hand: hand.clone(),
            });
            payouts.push(Payout {
                seat,
                player: p.name().to_string(),
                amount,
                hand,
            });
        }
        for p in &self.players {
            let won: u32 = payouts
                .iter()
                .filter(|w| w.player == p.name())
                .map(|w| w.amount)
                .sum();
            self.stats.record_result(p.name(), won, p.committed());
        }

        HandResult {
            hand_number: self.hand_number,
            pot,
            board: self.board.clone(),
            winners: payouts,
            ended_on,
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("hand_number", &self.hand_number)
            .field("button", &self.seating.button())
            .field("pot", &self.pot)
            .field("board", &self.board)
            .field("players", &self.players)
            .field("policy", &self.policy.name())
            .field("events", &self.events)
            .finish()
    }
}

/// Even integer shares of `pot`; the first `pot % n` shares get one extra chip.
pub fn split_pot(pot: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n32 = n as u32;
    let base = pot / n32;
    let rem = (pot % n32) as usize;
    (0..n).map(|i| base + u32::from(i < rem)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::policy::ScriptedPolicy;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Three-seat table mid-hand with the button on seat 0, fixed hole
    /// cards, a fixed board and `bets` already in the pot.
    fn showdown_table(
        holes: [&str; 3],
        board: &str,
        bets: [u32; 3],
    ) -> (Engine, Rc<RefCell<Vec<GameEvent>>>) {
        let config = TableConfig {
            num_players: 3,
            seed: Some(11),
            ..TableConfig::default()
        };
        let mut engine = Engine::new(config, Box::new(ScriptedPolicy::new())).unwrap();
        engine.start_hand();
        assert_eq!(engine.button(), 0);
        for (seat, hole) in holes.iter().enumerate() {
            for card in parse_cards(hole).unwrap() {
                engine.players[seat].give_card(card).unwrap();
            }
            engine.players[seat].commit(bets[seat]).unwrap();
            engine.pot += bets[seat];
        }
        engine.board = parse_cards(board).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.set_event_callback(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
        (engine, seen)
    }

    fn wins(events: &[GameEvent]) -> Vec<(String, u32)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Win { player, amount, .. } => Some((player.clone(), *amount)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn board_straight_splits_three_ways() {
        let (mut engine, seen) = showdown_table(
            ["2♣ 3♦", "4♣ 5♦", "6♣ 7♦"],
            "A♥ K♦ Q♣ J♠ 10♥",
            [40, 30, 30],
        );
        let result = engine.resolve(Street::River);

        assert_eq!(result.pot, 100);
        assert_eq!(result.total_paid(), 100);
        let order: Vec<(&str, u32)> = result
            .winners
            .iter()
            .map(|w| (w.player.as_str(), w.amount))
            .collect();
        // odd chip to the first seat left of the button
        assert_eq!(order, [("Player 2", 34), ("Player 3", 33), ("Player 1", 33)]);
        assert_eq!(
            wins(&seen.borrow()),
            [
                ("Player 2".to_string(), 34),
                ("Player 3".to_string(), 33),
                ("Player 1".to_string(), 33),
            ]
        );
        assert_eq!(engine.pot(), 0);
        assert!(result.winners.iter().all(|w| w.hand == result.winners[0].hand));
    }

    #[test]
    fn tied_pair_splits_and_loser_gets_nothing() {
        let (mut engine, seen) = showdown_table(
            ["A♣ Q♠", "A♠ Q♦", "3♣ 4♦"],
            "A♥ K♦ 7♣ 7♠ 2♥",
            [34, 34, 33],
        );
        let stacks_before: Vec<u32> = engine.players.iter().map(Player::stack).collect();
        let result = engine.resolve(Street::River);

        let order: Vec<(&str, u32)> = result
            .winners
            .iter()
            .map(|w| (w.player.as_str(), w.amount))
            .collect();
        assert_eq!(order, [("Player 2", 51), ("Player 1", 50)]);
        assert_eq!(wins(&seen.borrow()).len(), 2);
        assert_eq!(engine.players[0].stack(), stacks_before[0] + 50);
        assert_eq!(engine.players[1].stack(), stacks_before[1] + 51);
        assert_eq!(engine.players[2].stack(), stacks_before[2]);

        assert_eq!(engine.stats.get("Player 2").unwrap().total_profit, 51 - 34);
        assert_eq!(engine.stats.get("Player 1").unwrap().total_profit, 50 - 34);
        assert_eq!(engine.stats.get("Player 3").unwrap().total_profit, -33);
    }

    #[test]
    fn split_pot_hands_remainder_to_first_winners() {
        assert_eq!(split_pot(100, 3), vec![34, 33, 33]);
        assert_eq!(split_pot(101, 2), vec![51, 50]);
        assert_eq!(split_pot(90, 1), vec![90]);
        assert!(split_pot(10, 0).is_empty());
        assert_eq!(split_pot(7, 3).iter().sum::<u32>(), 7);
    }
}
