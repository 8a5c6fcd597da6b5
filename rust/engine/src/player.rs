use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Seat label relative to the button.
///
/// Labels follow the seat offset from the button: BTN, SB, BB, UTG, MP, CO,
/// then MP2, MP3, ... for tables larger than six.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    Middle,
    Cutoff,
    /// Overflow middle seats, numbered from 2.
    MiddleExtra(u8),
}

impl Position {
    /// Label for the seat `offset` places after the button.
    pub fn from_offset(offset: usize) -> Position {
        match offset {
            0 => Position::Button,
            1 => Position::SmallBlind,
            2 => Position::BigBlind,
            3 => Position::UnderTheGun,
            4 => Position::Middle,
            5 => Position::Cutoff,
            n => Position::MiddleExtra((n - 4) as u8),
        }
    }

    /// Acting-strength rank: SB=0, BB=1, UTG=2, MP=3, CO=4, BTN=5.
    /// Overflow middle seats rank with MP.
    pub fn strength(self) -> u8 {
        match self {
            Position::SmallBlind => 0,
            Position::BigBlind => 1,
            Position::UnderTheGun => 2,
            Position::Middle | Position::MiddleExtra(_) => 3,
            Position::Cutoff => 4,
            Position::Button => 5,
        }
    }

    pub fn is_late(self) -> bool {
        self.strength() >= Position::Cutoff.strength()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Button => f.write_str("BTN"),
            Position::SmallBlind => f.write_str("SB"),
            Position::BigBlind => f.write_str("BB"),
            Position::UnderTheGun => f.write_str("UTG"),
            Position::Middle => f.write_str("MP"),
            Position::Cutoff => f.write_str("CO"),
            Position::MiddleExtra(n) => write!(f, "MP{}", n),
        }
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet; carries the amount the policy expects to pay
    Call(u32),
    /// Raise to a new total bet level for the street
    Raise(u32),
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seated player and its per-hand state.
///
/// The stack persists across hands; everything else is cleared by
/// [`Player::reset_hand`]. Chips only leave the stack through
/// [`Player::commit`], at the moment a blind, call or raise is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    name: String,
    stack: u32,
    hole: Vec<Card>,
    /// Chips committed on the current street
    current_bet: u32,
    /// Chips committed over the whole hand
    committed: u32,
    is_active: bool,
    folded: bool,
    position: Position,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            hole: Vec::with_capacity(2),
            current_bet: 0,
            committed: 0,
            is_active: true,
            folded: false,
            position: Position::Button,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn folded(&self) -> bool {
        self.folded
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        if self.hole.len() >= 2 {
            return Err(GameError::HoleCardsFull);
        }
        self.hole.push(c);
        Ok(())
    }

    /// Clears cards, bets and fold state. The stack is kept.
    pub fn reset_hand(&mut self) {
        self.hole.clear();
        self.current_bet = 0;
        self.committed = 0;
        self.is_active = true;
        self.folded = false;
    }

    /// Starts a new street: bets already in the pot no longer count toward
    /// the amount to call.
    pub fn reset_street(&mut self) {
        self.current_bet = 0;
    }

    pub fn fold(&mut self) {
        self.is_active = false;
        self.folded = true;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves `amount` from the stack into this street's bet.
    pub fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                needed: amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.current_bet += amount;
        self.committed += amount;
        Ok(())
    }

    /// Refills a busted stack. Returns whether a rebuy happened.
    pub fn rebuy_if_bust(&mut self, initial_stack: u32) -> bool {
        if self.stack == 0 {
            self.stack = initial_stack;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_labels_overflow_past_cutoff() {
        let labels: Vec<String> = (0..9).map(|o| Position::from_offset(o).to_string()).collect();
        assert_eq!(
            labels,
            ["BTN", "SB", "BB", "UTG", "MP", "CO", "MP2", "MP3", "MP4"]
        );
    }

    #[test]
    fn late_positions() {
        assert!(Position::Button.is_late());
        assert!(Position::Cutoff.is_late());
        assert!(!Position::Middle.is_late());
        assert!(!Position::MiddleExtra(3).is_late());
        assert!(!Position::SmallBlind.is_late());
    }

    #[test]
    fn commit_tracks_street_and_hand_totals() {
        let mut p = Player::new("p", 100);
        p.commit(10).unwrap();
        p.reset_street();
        p.commit(30).unwrap();
        assert_eq!(p.stack(), 60);
        assert_eq!(p.current_bet(), 30);
        assert_eq!(p.committed(), 40);
        assert!(p.commit(61).is_err());
        assert_eq!(p.stack(), 60);
    }
}
