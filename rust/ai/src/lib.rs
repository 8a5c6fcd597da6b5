//! # pokersim-ai: Decision policies for the table simulator
//!
//! Implementations of [`DecisionPolicy`] that can be plugged into
//! [`pokersim_engine::engine::Engine`].
//!
//! ## Core Components
//!
//! - [`heuristic`] - Position- and strength-driven reference policy
//! - [`random`] - Seeded random policy for fuzzing and baselines
//! - [`create_policy`] - Factory selecting a policy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use pokersim_ai::create_policy;
//! use pokersim_engine::config::TableConfig;
//! use pokersim_engine::engine::Engine;
//!
//! let policy = create_policy("heuristic", Some(42)).unwrap();
//! let config = TableConfig { num_players: 6, seed: Some(42), ..TableConfig::default() };
//! let mut engine = Engine::new(config, policy).unwrap();
//!
//! let result = engine.play_hand();
//! println!("hand {} pot {}", result.hand_number, result.pot);
//! ```
//!
//! ## Policy Names
//!
//! - `"heuristic"` - [`heuristic::HeuristicPolicy`]
//! - `"random"` - [`random::RandomPolicy`], seeded when a seed is given
//! - `"passive"` - checks or calls every turn

pub use pokersim_engine::policy::{DecisionContext, DecisionPolicy};

use pokersim_engine::policy::ScriptedPolicy;
use thiserror::Error;

pub mod heuristic;
pub mod random;

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: [&str; 3] = ["heuristic", "random", "passive"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown policy: {0} (expected one of: heuristic, random, passive)")]
    Unknown(String),
}

/// Builds a boxed policy by name.
///
/// `seed` only affects policies that draw random numbers.
///
/// # Example
///
/// ```rust
/// use pokersim_ai::create_policy;
///
/// let policy = create_policy("heuristic", None).unwrap();
/// assert_eq!(policy.name(), "heuristic");
/// assert!(create_policy("gto", None).is_err());
/// ```
pub fn create_policy(
    name: &str,
    seed: Option<u64>,
) -> Result<Box<dyn DecisionPolicy>, PolicyError> {
    match name.to_ascii_lowercase().as_str() {
        "heuristic" => Ok(Box::new(heuristic::HeuristicPolicy::new())),
        "random" => Ok(Box::new(match seed {
            Some(s) => random::RandomPolicy::with_seed(s),
            None => random::RandomPolicy::new(),
        })),
        "passive" => Ok(Box::new(ScriptedPolicy::passive())),
        _ => Err(PolicyError::Unknown(name.to_string())),
    }
}
