//! # pokersim-engine: Texas Hold'em table simulator core
//!
//! Runs hands of no-limit-style Hold'em for 2 to 9 seats with a pluggable
//! decision policy. Provides deck handling, hand evaluation, betting rounds,
//! pot resolution, session statistics and an observable event stream.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded deck with discard tracking (ChaCha20 RNG)
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`player`] - Player state, positions and actions
//! - [`policy`] - The `DecisionPolicy` seam and a scripted policy
//! - [`rules`] - Action validation against the table bet
//! - [`betting`] - One street of betting
//! - [`engine`] - Hand orchestration and pot resolution
//! - [`events`] / [`stats`] - Event stream and per-player statistics
//! - [`logger`] - Hand-log records
//!
//! ## Quick Start
//!
//! ```rust
//! use pokersim_engine::cards::parse_cards;
//! use pokersim_engine::hand::{evaluate, Category};
//!
//! let hole = parse_cards("A♥ K♥").unwrap();
//! let board = parse_cards("Q♥ J♥ 10♥ 2♣ 3♦").unwrap();
//!
//! let strength = evaluate(&hole, &board);
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Play
//!
//! A seeded table replays the same hands:
//!
//! ```rust
//! use pokersim_engine::config::TableConfig;
//! use pokersim_engine::engine::Engine;
//! use pokersim_engine::policy::ScriptedPolicy;
//!
//! let config = TableConfig { num_players: 4, seed: Some(42), ..TableConfig::default() };
//! let mut a = Engine::new(config.clone(), Box::new(ScriptedPolicy::passive())).unwrap();
//! let mut b = Engine::new(config, Box::new(ScriptedPolicy::passive())).unwrap();
//! assert_eq!(a.play_hand(), b.play_hand());
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod rules;
pub mod stats;
