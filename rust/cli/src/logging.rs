//! Tracing subscriber setup for the `pokersim` binary.
//!
//! Filtering follows `RUST_LOG`; without it only warnings are shown (the
//! engine warns when a policy returns an action the table rejects).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls keep the first one.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
