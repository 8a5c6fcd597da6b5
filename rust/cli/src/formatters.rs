//! Card, action, and statistics formatters for terminal display.
//!
//! Cards use Unicode suit symbols where the terminal is expected to support
//! them (always on Unix-like systems, detected on Windows) and `h d c s`
//! letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use pokersim_engine::cards::{Card, Rank, Suit};
//! use pokersim_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use std::fmt::Write as _;

use pokersim_engine::cards::{Card, Suit};
use pokersim_engine::stats::Statistics;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Elsewhere assumes support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    let s = if supports_unicode() {
        suit.symbol()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
    };
    s.to_string()
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Cards separated by spaces, without brackets.
pub fn format_hand(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Formatted board string like "[A♠ K♥ Q♦]" or "[]" if empty
pub fn format_board(cards: &[Card]) -> String {
    format!("[{}]", format_hand(cards))
}

/// One row per player, sorted by name.
pub fn format_stats_table(stats: &Statistics) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:<12} {:>6} {:>5} {:>6} {:>8} {:>6} {:>6} {:>6} {:>6} {:>5} {:>6}  {}",
        "Player",
        "Hands",
        "Won",
        "Win%",
        "Profit",
        "Folds",
        "Checks",
        "Calls",
        "Raises",
        "AllIn",
        "Rebuys",
        "Best hand"
    );
    for (name, p) in stats.iter() {
        let best = p
            .best_hand
            .as_ref()
            .map(|h| h.category.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            s,
            "{:<12} {:>6} {:>5} {:>5.1}% {:>8} {:>6} {:>6} {:>6} {:>6} {:>5} {:>6}  {}",
            name,
            p.hands_played,
            p.hands_won,
            p.win_rate() * 100.0,
            p.total_profit,
            p.fold_count,
            p.check_count,
            p.call_count,
            p.raise_count,
            p.all_in_count,
            p.rebuy_count,
            best
        );
    }
    s
}
