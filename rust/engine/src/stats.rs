use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hand::HandStrength;

/// Session counters for one player. Only ever increase (profit aside).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hands_played: u64,
    pub hands_won: u64,
    /// Net chips won minus chips committed, summed over hands
    pub total_profit: i64,
    pub best_hand: Option<HandStrength>,
    pub all_in_count: u64,
    pub fold_count: u64,
    pub check_count: u64,
    pub call_count: u64,
    pub raise_count: u64,
    pub rebuy_count: u64,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.hands_won as f64 / self.hands_played as f64
        }
    }
}

/// Per-player statistics keyed by player name, owned by the engine for the
/// whole session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    players: BTreeMap<String, PlayerStats>,
}

impl Statistics {
    pub fn get(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerStats)> {
        self.players.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn entry(&mut self, name: &str) -> &mut PlayerStats {
        self.players.entry(name.to_string()).or_default()
    }

    pub fn record_hand_played(&mut self, name: &str) {
        self.entry(name).hands_played += 1;
    }

    pub fn record_rebuy(&mut self, name: &str) {
        self.entry(name).rebuy_count += 1;
    }

    pub fn record_fold(&mut self, name: &str) {
        self.entry(name).fold_count += 1;
    }

    pub fn record_check(&mut self, name: &str) {
        self.entry(name).check_count += 1;
    }

    pub fn record_call(&mut self, name: &str, all_in: bool) {
        let s = self.entry(name);
        s.call_count += 1;
        if all_in {
            s.all_in_count += 1;
        }
    }

    pub fn record_raise(&mut self, name: &str, all_in: bool) {
        let s = self.entry(name);
        s.raise_count += 1;
        if all_in {
            s.all_in_count += 1;
        }
    }

    pub fn record_win(&mut self, name: &str) {
        self.entry(name).hands_won += 1;
    }

    /// Books the net result of a finished hand.
    pub fn record_result(&mut self, name: &str, winnings: u32, committed: u32) {
        self.entry(name).total_profit += i64::from(winnings) - i64::from(committed);
    }

    /// Keeps the strongest hand seen at showdown.
    pub fn record_showdown_hand(&mut self, name: &str, hand: &HandStrength) {
        let s = self.entry(name);
        if s.best_hand.as_ref().is_none_or(|best| hand > best) {
            s.best_hand = Some(hand.clone());
        }
    }
}
