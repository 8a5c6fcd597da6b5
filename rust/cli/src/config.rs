//! Layered table configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `POKERSIM_CONFIG`, `POKERSIM_*` environment variables, command-line flags.
//! Every field remembers which layer set it.

use pokersim_engine::config::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

use crate::cli::TableArgs;

pub const CONFIG_ENV: &str = "POKERSIM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub table: TableConfig,
    pub policy: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            policy: "heuristic".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    #[default]
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSources {
    pub num_players: ValueSource,
    pub initial_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub four_card_flop: ValueSource,
    pub max_raises_per_street: ValueSource,
    pub seed: ValueSource,
    pub policy: ValueSource,
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Defaults, then file, then environment. Not validated yet.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.num_players {
            cfg.table.num_players = v;
            sources.num_players = ValueSource::File;
        }
        if let Some(v) = f.initial_stack {
            cfg.table.initial_stack = v;
            sources.initial_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.table.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.table.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.four_card_flop {
            cfg.table.four_card_flop = v;
            sources.four_card_flop = ValueSource::File;
        }
        if let Some(v) = f.max_raises_per_street {
            cfg.table.max_raises_per_street = v;
            sources.max_raises_per_street = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.table.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.policy {
            cfg.policy = v;
            sources.policy = ValueSource::File;
        }
    }

    if let Some(v) = env_value("POKERSIM_PLAYERS")? {
        cfg.table.num_players = v;
        sources.num_players = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSIM_STACK")? {
        cfg.table.initial_stack = v;
        sources.initial_stack = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSIM_SMALL_BLIND")? {
        cfg.table.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSIM_BIG_BLIND")? {
        cfg.table.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_var("POKERSIM_FOUR_CARD_FLOP") {
        cfg.table.four_card_flop = parse_bool(&v).ok_or_else(|| {
            ConfigError::Invalid(format!("Invalid POKERSIM_FOUR_CARD_FLOP: {}", v))
        })?;
        sources.four_card_flop = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSIM_MAX_RAISES")? {
        cfg.table.max_raises_per_street = v;
        sources.max_raises_per_street = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSIM_SEED")? {
        cfg.table.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_var("POKERSIM_POLICY") {
        cfg.policy = v;
        sources.policy = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Full resolution including command-line flags, validated.
pub fn resolve(args: &TableArgs) -> Result<ConfigResolved, ConfigError> {
    let mut resolved = load_with_sources()?;
    resolved.apply_cli(args);
    resolved.validate()?;
    Ok(resolved)
}

impl ConfigResolved {
    pub fn apply_cli(&mut self, args: &TableArgs) {
        let (cfg, src) = (&mut self.config, &mut self.sources);
        if let Some(v) = args.players {
            cfg.table.num_players = v;
            src.num_players = ValueSource::Cli;
        }
        if let Some(v) = args.stack {
            cfg.table.initial_stack = v;
            src.initial_stack = ValueSource::Cli;
        }
        if let Some(v) = args.small_blind {
            cfg.table.small_blind = v;
            src.small_blind = ValueSource::Cli;
        }
        if let Some(v) = args.big_blind {
            cfg.table.big_blind = v;
            src.big_blind = ValueSource::Cli;
        }
        if args.four_card_flop {
            cfg.table.four_card_flop = true;
            src.four_card_flop = ValueSource::Cli;
        }
        if let Some(v) = args.max_raises {
            cfg.table.max_raises_per_street = v;
            src.max_raises_per_street = ValueSource::Cli;
        }
        if let Some(v) = args.seed {
            cfg.table.seed = Some(v);
            src.seed = ValueSource::Cli;
        }
        if let Some(v) = &args.policy {
            cfg.policy = v.clone();
            src.policy = ValueSource::Cli;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config
            .table
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let policy = self.config.policy.to_ascii_lowercase();
        if !pokersim_ai::POLICY_NAMES.contains(&policy.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid configuration: unknown policy {:?}",
                self.config.policy
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default, alias = "players")]
    num_players: Option<usize>,
    #[serde(default)]
    initial_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    four_card_flop: Option<bool>,
    #[serde(default)]
    max_raises_per_street: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    policy: Option<String>,
}

/// Set and non-empty.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env_var(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, v))),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
