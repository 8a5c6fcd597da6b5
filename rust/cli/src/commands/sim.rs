//! Simulation command handler.
//!
//! Builds a table from the resolved configuration, plays the requested number
//! of hands with the chosen policy and prints per-player statistics. With
//! `--output` every hand is appended to a JSONL hand log; with `--events`
//! every game event is printed as it happens.

use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use pokersim_ai::create_policy;
use pokersim_engine::engine::{Engine, HandResult};
use pokersim_engine::events::GameEvent;
use tracing::info;

use crate::cli::TableArgs;
use crate::config;
use crate::error::CliError;
use crate::formatters::format_stats_table;
use crate::hand_log::{session_id, HandLogger};
use crate::ui;

pub fn handle_sim_command(
    hands: u64,
    output: Option<&str>,
    events: bool,
    table: &TableArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let resolved = config::resolve(table)?;
    let cfg = resolved.config;
    let policy = create_policy(&cfg.policy, cfg.table.seed)?;
    let mut engine = Engine::new(cfg.table.clone(), policy)?;

    let feed = Rc::new(RefCell::new(Vec::<String>::new()));
    if events {
        let sink = Rc::clone(&feed);
        engine.set_event_callback(move |e: &GameEvent| sink.borrow_mut().push(e.description()));
    }

    let mut logger = match output {
        Some(p) => {
            let path = Path::new(p);
            if path.metadata().map(|m| m.len() > 0).unwrap_or(false) {
                ui::display_warning(err, &format!("appending to existing hand log {}", p))?;
            }
            Some(HandLogger::create(path)?)
        }
        None => None,
    };
    let session = session_id();
    info!(hands, players = cfg.table.num_players, policy = %cfg.policy, "simulation started");

    let mut failure: Option<CliError> = None;
    engine.run_simulation(hands, |engine, result| {
        if failure.is_some() {
            return;
        }
        let lines: Vec<String> = feed.borrow_mut().drain(..).collect();
        if let Err(e) = record_hand(engine, result, &lines, logger.as_mut(), &session, &mut *out) {
            failure = Some(e);
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    writeln!(
        out,
        "Simulated: {} hands ({} players, policy {})",
        engine.hand_number(),
        cfg.table.num_players,
        engine.policy_name()
    )?;
    write!(out, "{}", format_stats_table(engine.stats()))?;
    if let Some(logger) = logger {
        let path = logger.path().display().to_string();
        let n = logger.finish()?;
        writeln!(out, "Hand log: {} records written to {}", n, path)?;
    }
    Ok(())
}

fn record_hand(
    engine: &Engine,
    result: &HandResult,
    events: &[String],
    logger: Option<&mut HandLogger>,
    session: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    for line in events {
        writeln!(out, "[hand {}] {}", result.hand_number, line)?;
    }
    if let Some(logger) = logger {
        logger.write(&engine.hand_record(session, result))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn seeded(players: usize, seed: u64) -> TableArgs {
        TableArgs {
            players: Some(players),
            seed: Some(seed),
            policy: Some("heuristic".into()),
            ..TableArgs::default()
        }
    }

    #[test]
    #[serial]
    fn test_sim_prints_summary_and_table() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(20, None, false, &seeded(4, 3), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Simulated: 20 hands (4 players, policy heuristic)"));
        for p in 1..=4 {
            assert!(output.contains(&format!("Player {}", p)));
        }
    }

    #[test]
    #[serial]
    fn test_sim_events_are_printed_per_hand() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(2, None, true, &seeded(3, 8), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[hand 1]"));
        assert!(output.contains("[hand 2]"));
    }

    #[test]
    #[serial]
    fn test_sim_rejects_zero_hands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let r = handle_sim_command(0, None, false, &seeded(2, 1), &mut out, &mut err);
        assert!(matches!(r, Err(CliError::InvalidInput(_))));
    }
}
