//! `tracing` subscriber setup.
//!
//! Library crates only emit events; the binary installs the subscriber once.
//! The `HOLOCRON_LOG` environment variable overrides the configured filter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (e.g. `holocron_engine=debug`).
pub const LOG_ENV: &str = "HOLOCRON_LOG";

/// Builds the filter from `HOLOCRON_LOG`, falling back to `default_filter`
/// and then to `warn` if neither parses.
#[must_use]
pub fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs a formatting subscriber writing to stderr.
///
/// Returns `false` if a global subscriber was already set (as in tests that
/// call this more than once).
pub fn init_logging(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
