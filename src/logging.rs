//! Logging initialization for the helper binaries.
//!
//! Logs go to stderr; stdout is reserved for failure diagnostics.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

/// Env var checked first for the log filter (e.g. `debug`).
pub const ENV_LOG_FILTER: &str = "PRECACHE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = filter_from(
        env::var(ENV_LOG_FILTER).ok().as_deref(),
        env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
    );

    let _ = tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// First directive that parses wins: `PRECACHE_LOG`, then `RUST_LOG`, then
/// `info`.
fn filter_from(primary: Option<&str>, fallback: Option<&str>) -> EnvFilter {
    [primary, fallback]
        .into_iter()
        .flatten()
        .filter(|raw| !raw.trim().is_empty())
        .find_map(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
