//! Deal command handler.
//!
//! Shuffles a fresh deck, deals two hole cards to each seat and a five-card
//! board, and shows what each seat ends up holding.

use crate::error::CliError;
use crate::formatters::format_hand;
use pokersim_engine::cards::Card;
use pokersim_engine::config::{MAX_PLAYERS, MIN_PLAYERS};
use pokersim_engine::deck::Deck;
use pokersim_engine::hand::evaluate;
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    let mut deck = Deck::new_with_seed(seed.unwrap_or_else(rand::random));
    deck.shuffle();

    let mut holes: Vec<Vec<Card>> = vec![Vec::with_capacity(2); players];
    for _ in 0..2 {
        for hole in holes.iter_mut() {
            hole.push(deck.draw()?);
        }
    }
    let board = (0..5)
        .map(|_| deck.draw())
        .collect::<Result<Vec<_>, _>>()?;

    for (i, hole) in holes.iter().enumerate() {
        let strength = evaluate(hole, &board);
        writeln!(out, "Hole P{}: {}  ({})", i + 1, format_hand(hole), strength.category)?;
    }
    writeln!(out, "Board: {}", format_hand(&board))?;
    Ok(())
}
