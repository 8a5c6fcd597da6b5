use std::cell::RefCell;
use std::rc::Rc;

use pokersim_engine::config::TableConfig;
use pokersim_engine::engine::Engine;
use pokersim_engine::events::GameEvent;
use pokersim_engine::logger::{HandRecord, Street};
use pokersim_engine::player::PlayerAction;
use pokersim_engine::policy::{DecisionContext, DecisionPolicy, ScriptedPolicy};

fn table(n: usize, seed: u64) -> TableConfig {
    TableConfig {
        num_players: n,
        seed: Some(seed),
        ..TableConfig::default()
    }
}

/// Shoves with any pair or better, calls small bets, folds the rest.
struct Shover;

impl DecisionPolicy for Shover {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        let strength = ctx.hand_strength();
        if strength.category >= pokersim_engine::hand::Category::Pair {
            ctx.raise_by(ctx.stack)
        } else if ctx.to_call <= ctx.big_blind {
            ctx.check_or_call()
        } else {
            ctx.check_or_fold()
        }
    }

    fn name(&self) -> &str {
        "shover"
    }
}

#[test]
fn rejects_bad_table_sizes() {
    for n in [0, 1, 10] {
        assert!(Engine::new(table(n, 1), Box::new(ScriptedPolicy::new())).is_err());
    }
}

#[test]
fn everyone_folds_to_big_blind() {
    let mut engine = Engine::new(table(3, 1), Box::new(ScriptedPolicy::new())).unwrap();
    let result = engine.play_hand();

    assert_eq!(result.ended_on, Street::Preflop);
    assert_eq!(result.pot, 15);
    assert_eq!(result.winners.len(), 1);
    assert_eq!(result.winners[0].player, "Player 3");
    assert_eq!(result.winners[0].hand, None);
    assert!(result.board.is_empty());
    assert_eq!(engine.pot(), 0);

    let stacks: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, [1000, 995, 1005]);
    assert_eq!(engine.stats().get("Player 3").unwrap().total_profit, 5);
    assert_eq!(engine.stats().get("Player 2").unwrap().total_profit, -5);
}

#[test]
fn passive_table_reaches_showdown() {
    let mut engine = Engine::new(table(3, 2), Box::new(ScriptedPolicy::passive())).unwrap();
    let result = engine.play_hand();

    assert!(result.went_to_showdown());
    assert_eq!(result.pot, 30);
    assert_eq!(result.board.len(), 5);
    assert_eq!(result.total_paid(), 30);
    assert!(result.winners.iter().all(|w| w.hand.is_some()));
    assert_eq!(engine.deck_remaining(), 52 - 6 - 5);
}

#[test]
fn button_moves_one_seat_per_hand() {
    let mut engine = Engine::new(table(4, 3), Box::new(ScriptedPolicy::new())).unwrap();
    let mut buttons = Vec::new();
    for _ in 0..5 {
        engine.play_hand();
        buttons.push(engine.button());
    }
    assert_eq!(buttons, [0, 1, 2, 3, 0]);
    assert_eq!(engine.hand_number(), 5);
}

#[test]
fn every_street_opens_after_the_big_blind() {
    let mut engine = Engine::new(table(4, 1), Box::new(ScriptedPolicy::passive())).unwrap();
    engine.play_hand();
    assert_eq!(engine.button(), 0);

    for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
        let first = engine
            .actions()
            .iter()
            .find(|a| a.street == street)
            .map(|a| a.player.as_str());
        assert_eq!(first, Some("Player 4"), "{}", street);
    }
}

#[test]
fn heads_up_small_blind_opens_every_street() {
    let mut engine = Engine::new(table(2, 1), Box::new(ScriptedPolicy::passive())).unwrap();
    engine.play_hand();
    for street in [Street::Preflop, Street::Flop, Street::River] {
        let first = engine.actions().iter().find(|a| a.street == street).unwrap();
        assert_eq!(first.player, "Player 2");
    }
}

#[test]
fn four_card_flop_deals_six_board_cards() {
    let config = TableConfig {
        four_card_flop: true,
        ..table(2, 4)
    };
    let mut engine = Engine::new(config, Box::new(ScriptedPolicy::passive())).unwrap();
    let result = engine.play_hand();
    assert_eq!(result.board.len(), 6);
}

#[test]
fn deal_streets_outside_a_hand() {
    let mut engine = Engine::new(table(2, 5), Box::new(ScriptedPolicy::new())).unwrap();
    engine.deal_flop();
    engine.deal_turn();
    engine.deal_river();
    assert_eq!(engine.board().len(), 5);
    assert_eq!(engine.deck_remaining(), 47);
}

#[test]
fn events_follow_hand_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut engine = Engine::new(table(3, 6), Box::new(ScriptedPolicy::passive())).unwrap();
    engine.set_event_callback(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
    engine.play_hand();

    let events = seen.borrow();
    assert!(matches!(events[0], GameEvent::SmallBlind { amount: 5, .. }));
    assert!(matches!(events[1], GameEvent::BigBlind { amount: 10, pot: 15, .. }));
    assert!(events[2..5]
        .iter()
        .all(|e| matches!(e, GameEvent::Deal { cards, .. } if cards.len() == 2)));
    assert!(matches!(events.last(), Some(GameEvent::HandComplete { hand: 1, .. })));

    let community: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Community { cards, .. } => Some(cards.len()),
            _ => None,
        })
        .collect();
    assert_eq!(community, [3, 1, 1]);

    let first_win = events
        .iter()
        .position(|e| matches!(e, GameEvent::Win { .. }))
        .unwrap();
    let last_action = events
        .iter()
        .rposition(|e| matches!(e, GameEvent::Call { .. } | GameEvent::Check { .. }))
        .unwrap();
    assert!(last_action < first_win);
}

#[test]
fn cleared_callback_stops_delivery() {
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    let mut engine = Engine::new(table(2, 7), Box::new(ScriptedPolicy::new())).unwrap();
    engine.set_event_callback(move |_: &GameEvent| *sink.borrow_mut() += 1);
    engine.play_hand();
    let after_first = *count.borrow();
    assert!(after_first > 0);
    engine.clear_event_callback();
    engine.play_hand();
    assert_eq!(*count.borrow(), after_first);
}

#[test]
fn chips_are_conserved_across_rebuys() {
    let n = 4;
    let mut engine = Engine::new(table(n, 8), Box::new(Shover)).unwrap();
    engine.run_simulation(300, |e, result| {
        assert_eq!(e.pot(), 0);
        assert_eq!(result.total_paid(), result.pot);
    });

    let rebuys: u64 = engine.stats().iter().map(|(_, s)| s.rebuy_count).sum();
    let expected = (n as u64 + rebuys) * 1000;
    assert_eq!(engine.total_chips(), expected);

    let profit: i64 = engine.stats().iter().map(|(_, s)| s.total_profit).sum();
    assert_eq!(profit, 0);
    for (_, s) in engine.stats().iter() {
        assert_eq!(s.hands_played, 300);
    }
}

#[test]
fn seeded_tables_replay_identically() {
    let run = || {
        let mut engine = Engine::new(table(5, 99), Box::new(Shover)).unwrap();
        (0..25).map(|_| engine.play_hand()).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn hand_record_serializes_to_one_line() {
    let mut engine = Engine::new(table(3, 10), Box::new(ScriptedPolicy::passive())).unwrap();
    let result = engine.play_hand();
    let record = engine.hand_record("20260101", &result);

    assert_eq!(record.hand_id, "20260101-000001");
    assert_eq!(record.seed, Some(10));
    assert_eq!(record.community_cards.len(), 5);
    assert_eq!(record.pot_size, 30);
    assert_eq!(record.players.len(), 3);
    assert!(!record.actions.is_empty());
    assert_eq!(record.ended_on, Street::Showdown);

    let line = serde_json::to_string(&record).unwrap();
    assert!(!line.contains('\n'));
    let back: HandRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(back, record);
}
