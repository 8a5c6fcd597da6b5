use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::PlayerAction;

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 or 4 community cards)
    Flop,
    /// After turn
    Turn,
    /// After river
    River,
    /// Hands compared after the river
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Street::Preflop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        })
    }
}

/// Records a single applied action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action as applied by the table, after validation
    pub action: PlayerAction,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub player: String,
    pub winnings: u32,
    pub hole_cards: Vec<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub hole_cards: Vec<String>,
    pub stack: u32,
    pub folded: bool,
    pub is_active: bool,
}

/// One line of the append-only hand log.
///
/// The engine only builds these; writing them out is left to the caller.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Format: `<session>-<NNNNNN>`
    pub hand_id: String,
    /// Session seed, when the deck was seeded
    #[serde(default)]
    pub seed: Option<u64>,
    pub community_cards: Vec<String>,
    pub pot_size: u32,
    pub winners: Vec<WinnerRecord>,
    pub players: Vec<PlayerSnapshot>,
    /// Chronological list of applied actions
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    /// Last street played before resolution
    pub ended_on: Street,
    /// Timestamp injected by the writer (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(session: &str, seq: u64) -> String {
    format!("{}-{:06}", session, seq)
}
