use thiserror::Error;

use crate::cards::Card;

/// Non-fatal signals from [`crate::deck::Deck`]. Callers deal fewer cards
/// rather than failing the hand.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum DeckError {
    #[error("No card available: deck is empty")]
    EmptyDeck,
    #[error("Card {0} is not in the deck")]
    CardNotFound(Card),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient chips for action: need {needed}, have {stack}")]
    InsufficientChips { needed: u32, stack: u32 },
    #[error("Cannot check while facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Hole cards already full")]
    HoleCardsFull,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}
