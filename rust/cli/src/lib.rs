//! # pokersim CLI library
//!
//! Command-line front end for the pokersim table simulator.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand handler and returns
//! the process exit code, writing to the streams it is given.
//!
//! ## Available Subcommands
//!
//! - `sim`: Play many hands with a decision policy, optionally logging them as JSONL
//! - `deal`: Deal one set of hole cards and a board for inspection
//! - `eval`: Rank hands against a shared board
//! - `cfg`: Display the resolved table configuration and value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod hand_log;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, PokersimCli};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "deal", "eval", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["pokersim", "deal", "--seed", "42"];
/// let code = pokersim_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PokersimCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            hands,
            output,
            events,
            table,
        } => handle_sim_command(hands, output.as_deref(), events, &table, out, err),
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Eval { board, hands } => handle_eval_command(&hands, &board, out),
        Commands::Cfg { table } => handle_cfg_command(&table, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: pokersim <command> [options]\n\nCommands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: pokersim --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subcommand_parses() {
        let commands = vec![
            vec!["pokersim", "sim", "--hands", "1"],
            vec!["pokersim", "sim", "--players", "9", "--policy", "random", "--four-card-flop"],
            vec!["pokersim", "deal", "--seed", "1", "--players", "6"],
            vec!["pokersim", "eval", "--board", "Ah Kd 7c", "As Ks", "2c 2d"],
            vec!["pokersim", "cfg", "--seed", "3"],
        ];
        for cmd_args in commands {
            assert!(
                PokersimCli::try_parse_from(&cmd_args).is_ok(),
                "Failed to parse: {:?}",
                cmd_args
            );
        }
    }

    #[test]
    fn test_eval_requires_a_hand() {
        assert!(PokersimCli::try_parse_from(["pokersim", "eval"]).is_err());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["pokersim", "shuffle"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        for c in COMMANDS {
            assert!(stderr.contains(c));
        }
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["pokersim", "--help"], &mut out, &mut err), 0);
        assert!(String::from_utf8(out).unwrap().contains("sim"));
        assert!(err.is_empty());
    }
}
