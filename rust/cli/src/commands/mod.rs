//! Command handler modules for the pokersim CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`. Output streams
//! are passed in as `&mut dyn Write` so handlers can be tested in memory.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;
