//! Tracing subscriber setup.
//!
//! Logs go to stderr so command output on stdout stays clean. The filter is
//! taken from `FREST_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when no environment override is set.
pub const DEFAULT_FILTER: &str = "frest=info";

/// Build the filter from the environment.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("FREST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one is
/// kept.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok()
}
