use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandStrength;
use crate::logger::Street;

/// One observable occurrence during a hand. Produced once, never mutated.
///
/// Within a hand events arrive as: stack resets, blinds, hole-card deals,
/// betting actions interleaved with street reveals, wins, hand complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    StackReset {
        player: String,
        amount: u32,
    },
    SmallBlind {
        player: String,
        amount: u32,
        pot: u32,
    },
    BigBlind {
        player: String,
        amount: u32,
        pot: u32,
    },
    Deal {
        player: String,
        cards: Vec<Card>,
    },
    Fold {
        player: String,
        street: Street,
    },
    Check {
        player: String,
        street: Street,
    },
    Call {
        player: String,
        street: Street,
        amount: u32,
        pot: u32,
        all_in: bool,
    },
    Raise {
        player: String,
        street: Street,
        /// New table bet
        to: u32,
        /// Chips moved by this raise
        amount: u32,
        pot: u32,
        all_in: bool,
    },
    Community {
        street: Street,
        /// Cards revealed by this street
        cards: Vec<Card>,
        /// Whole board after the reveal
        board: Vec<Card>,
    },
    Win {
        player: String,
        amount: u32,
        /// `None` when everyone else folded
        hand: Option<HandStrength>,
    },
    HandComplete {
        hand: u64,
        street: Street,
        pot: u32,
    },
}

impl GameEvent {
    pub fn player(&self) -> Option<&str> {
        match self {
            GameEvent::StackReset { player, .. }
            | GameEvent::SmallBlind { player, .. }
            | GameEvent::BigBlind { player, .. }
            | GameEvent::Deal { player, .. }
            | GameEvent::Fold { player, .. }
            | GameEvent::Check { player, .. }
            | GameEvent::Call { player, .. }
            | GameEvent::Raise { player, .. }
            | GameEvent::Win { player, .. } => Some(player),
            GameEvent::Community { .. } | GameEvent::HandComplete { .. } => None,
        }
    }

    /// Human readable one-liner.
    pub fn description(&self) -> String {
        match self {
            GameEvent::StackReset { player, amount } => {
                format!("{} was reset with new stack of {}", player, amount)
            }
            GameEvent::SmallBlind { player, amount, .. } => {
                format!("{} posts small blind: {}", player, amount)
            }
            GameEvent::BigBlind { player, amount, .. } => {
                format!("{} posts big blind: {}", player, amount)
            }
            GameEvent::Deal { player, cards } => {
                format!("{} receives hole cards {}", player, join(cards))
            }
            GameEvent::Fold { player, .. } => format!("{} folds", player),
            GameEvent::Check { player, .. } => format!("{} checks", player),
            GameEvent::Call {
                player,
                amount,
                all_in,
                ..
            } => format!("{} calls {}{}", player, amount, all_in_tag(*all_in)),
            GameEvent::Raise {
                player, to, all_in, ..
            } => format!("{} raises to {}{}", player, to, all_in_tag(*all_in)),
            GameEvent::Community { street, board, .. } => {
                format!("{} dealt: {}", street, join(board))
            }
            GameEvent::Win {
                player,
                amount,
                hand: Some(h),
            } => format!("{} wins {} with {}", player, amount, h.category),
            GameEvent::Win {
                player,
                amount,
                hand: None,
            } => format!("{} wins {} (others folded)", player, amount),
            GameEvent::HandComplete { hand, street, pot } => {
                format!("Hand #{} complete ({}), pot {}", hand, street, pot)
            }
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn all_in_tag(all_in: bool) -> &'static str {
    if all_in {
        " (all-in)"
    } else {
        ""
    }
}

/// Synchronous event sink. Holds at most one callback; events emitted while
/// none is registered are dropped.
#[derive(Default)]
pub struct EventBus {
    sink: Option<Box<dyn FnMut(&GameEvent)>>,
}

impl EventBus {
    pub fn set<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.sink = Some(Box::new(callback));
    }

    pub fn clear(&mut self) {
        self.sink = None;
    }

    pub fn emit(&mut self, event: GameEvent) {
        tracing::trace!(event = %event, "game event");
        if let Some(sink) = self.sink.as_mut() {
            sink(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribed", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn bus_forwards_to_registered_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bus = EventBus::default();
        bus.emit(GameEvent::Fold {
            player: "dropped".into(),
            street: Street::Flop,
        });
        bus.set(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
        bus.emit(GameEvent::Check {
            player: "kept".into(),
            street: Street::Turn,
        });
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].player(), Some("kept"));
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let e = GameEvent::Call {
            player: "p".into(),
            street: Street::River,
            amount: 20,
            pot: 80,
            all_in: false,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["event_type"], "call");
        assert_eq!(v["amount"], 20);
        assert_eq!(e.description(), "p calls 20");
    }
}
