//! Eval command handler: rank hands against a shared board.
//!
//! Each hand is evaluated with the board (or with the pre-flop heuristic when
//! no board is given). The best hands are marked and listed as winners; equal
//! hands split.

use std::collections::HashSet;
use std::io::Write;

use crate::error::CliError;
use crate::formatters::{format_board, format_hand};
use pokersim_engine::cards::{parse_cards, Card};
use pokersim_engine::hand::{evaluate, HandStrength};

/// Four-card flop plus turn and river.
const MAX_BOARD: usize = 6;

pub fn handle_eval_command(
    hands: &[String],
    board: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let board = parse_cards(board)?;
    if board.len() > MAX_BOARD {
        return Err(CliError::InvalidInput(format!(
            "board has {} cards, at most {} allowed",
            board.len(),
            MAX_BOARD
        )));
    }
    let holdings = hands
        .iter()
        .map(|h| parse_cards(h))
        .collect::<Result<Vec<Vec<Card>>, _>>()?;
    if let Some(i) = holdings.iter().position(Vec::is_empty) {
        return Err(CliError::InvalidInput(format!("hand {} has no cards", i + 1)));
    }
    check_unique(&board, &holdings)?;

    let strengths: Vec<HandStrength> = holdings.iter().map(|h| evaluate(h, &board)).collect();
    let Some(best) = strengths.iter().max() else {
        return Err(CliError::InvalidInput("no hands given".into()));
    };

    if board.is_empty() {
        writeln!(out, "Board: [] (pre-flop strength)")?;
    } else {
        writeln!(out, "Board: {}", format_board(&board))?;
    }
    let mut winners = Vec::new();
    for (i, (cards, strength)) in holdings.iter().zip(&strengths).enumerate() {
        let mark = if strength == best { "*" } else { " " };
        if strength == best {
            winners.push(format!("Hand {}", i + 1));
        }
        writeln!(out, "{} Hand {}: {:<14} {}", mark, i + 1, format_hand(cards), strength)?;
    }
    if winners.len() > 1 {
        writeln!(out, "Split: {}", winners.join(", "))?;
    } else {
        writeln!(out, "Winner: {}", winners.join(", "))?;
    }
    Ok(())
}

fn check_unique(board: &[Card], holdings: &[Vec<Card>]) -> Result<(), CliError> {
    let mut seen = HashSet::new();
    for card in board.iter().chain(holdings.iter().flatten()) {
        if !seen.insert(*card) {
            return Err(CliError::InvalidInput(format!("card {} appears twice", card)));
        }
    }
    Ok(())
}
