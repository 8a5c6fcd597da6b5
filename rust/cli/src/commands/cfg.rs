//! Configuration command handler.
//!
//! Prints the resolved table configuration as JSON, one
//! `{"value": ..., "source": ...}` object per field, where `source` is one of
//! `default`, `file`, `env` or `cli`.

use crate::cli::TableArgs;
use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(args: &TableArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::resolve(args)?;

    let config::ConfigResolved { config, sources } = resolved;
    let table = &config.table;
    let display = serde_json::json!({
        "num_players": { "value": table.num_players, "source": sources.num_players },
        "initial_stack": { "value": table.initial_stack, "source": sources.initial_stack },
        "small_blind": { "value": table.small_blind, "source": sources.small_blind },
        "big_blind": { "value": table.big_blind, "source": sources.big_blind },
        "four_card_flop": { "value": table.four_card_flop, "source": sources.four_card_flop },
        "max_raises_per_street": {
            "value": table.max_raises_per_street,
            "source": sources.max_raises_per_street,
        },
        "seed": { "value": table.seed, "source": sources.seed },
        "policy": { "value": config.policy, "source": sources.policy },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_every_field_with_source() {
        unsafe {
            std::env::remove_var(config::CONFIG_ENV);
            std::env::remove_var("POKERSIM_SEED");
        }
        let args = TableArgs {
            seed: Some(9),
            ..TableArgs::default()
        };
        let mut out = Vec::new();
        handle_cfg_command(&args, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        for key in [
            "num_players",
            "initial_stack",
            "small_blind",
            "big_blind",
            "four_card_flop",
            "max_raises_per_street",
            "seed",
            "policy",
        ] {
            assert!(json[key]["source"].is_string(), "{} has no source", key);
        }
        assert_eq!(json["seed"]["value"], 9);
        assert_eq!(json["seed"]["source"], "cli");
    }

    #[test]
    #[serial]
    fn test_cfg_rejects_invalid_table() {
        let args = TableArgs {
            small_blind: Some(50),
            big_blind: Some(10),
            ..TableArgs::default()
        };
        let mut out = Vec::new();
        let err = handle_cfg_command(&args, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(out.is_empty());
    }
}
