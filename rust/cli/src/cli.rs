//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pokersim",
    version,
    about = "Hold'em table simulator: deal, evaluate and simulate hands"
)]
pub struct PokersimCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table settings that can override the config file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Number of seats (2-9)
    #[arg(long)]
    pub players: Option<usize>,
    /// Starting stack for every player
    #[arg(long)]
    pub stack: Option<u32>,
    #[arg(long)]
    pub small_blind: Option<u32>,
    #[arg(long)]
    pub big_blind: Option<u32>,
    /// Deal four cards on the flop
    #[arg(long)]
    pub four_card_flop: bool,
    /// Raises allowed per street
    #[arg(long)]
    pub max_raises: Option<u32>,
    /// Deck and policy seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Decision policy: heuristic, random or passive
    #[arg(long)]
    pub policy: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play many hands and report per-player statistics
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: u64,
        /// Append one JSON hand record per line to this file
        #[arg(long)]
        output: Option<String>,
        /// Print every game event
        #[arg(long)]
        events: bool,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Deal hole cards and a board from a fresh deck
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Rank hands against an optional shared board
    Eval {
        /// Community cards, e.g. "Ah Kd 7c"
        #[arg(long, default_value = "")]
        board: String,
        /// One quoted card list per hand, e.g. "As Ks"
        #[arg(required = true)]
        hands: Vec<String>,
    },
    /// Show the resolved table configuration and where each value came from
    Cfg {
        #[command(flatten)]
        table: TableArgs,
    },
}
