use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::STARTING_STACK;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

/// Table construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub num_players: usize,
    pub initial_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Deal four flop cards instead of three
    pub four_card_flop: bool,
    /// Raises allowed per street before further raises are treated as calls
    pub max_raises_per_street: u32,
    /// Deck seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_players: 6,
            initial_stack: STARTING_STACK,
            small_blind: 5,
            big_blind: 10,
            four_card_flop: false,
            max_raises_per_street: 4,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(GameError::InvalidConfig(format!(
                "num_players must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.num_players
            )));
        }
        if self.initial_stack == 0 {
            return Err(GameError::InvalidConfig(
                "initial_stack must be >0".into(),
            ));
        }
        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(format!(
                "blinds must satisfy 0 < small ({}) <= big ({})",
                self.small_blind, self.big_blind
            )));
        }
        if self.max_raises_per_street == 0 {
            return Err(GameError::InvalidConfig(
                "max_raises_per_street must be >=1".into(),
            ));
        }
        Ok(())
    }

    pub fn flop_size(&self) -> usize {
        if self.four_card_flop {
            4
        } else {
            3
        }
    }
}
