use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, Rank, Suit};
use crate::errors::DeckError;

/// A 52-card deck that tracks which cards have already left it.
///
/// `remaining() + discarded().len() == 52` holds after every operation and
/// no card is ever in both sets. The RNG lives as long as the deck, so a
/// seeded deck reshuffled by [`Deck::reset`] keeps producing a reproducible
/// sequence of hands.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    discarded: HashSet<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Unshuffled deck with an unpredictable RNG.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            discarded: HashSet::with_capacity(52),
            rng,
        }
    }

    /// Permutes the cards still in the deck. Discards are untouched.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the last card of the sequence.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let c = self.cards.pop().ok_or(DeckError::EmptyDeck)?;
        self.discarded.insert(c);
        Ok(c)
    }

    /// Pulls a named card out of the deck, wherever it sits.
    pub fn deal_specific(&mut self, rank: Rank, suit: Suit) -> Result<Card, DeckError> {
        let wanted = Card { rank, suit };
        let idx = self
            .cards
            .iter()
            .position(|c| *c == wanted)
            .ok_or(DeckError::CardNotFound(wanted))?;
        let c = self.cards.remove(idx);
        self.discarded.insert(c);
        Ok(c)
    }

    /// Rebuilds all 52 cards, clears the discards and reshuffles.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.discarded.clear();
        self.shuffle();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn discarded(&self) -> &HashSet<Card> {
        &self.discarded
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
