//! Tracing setup. Logs go to stderr so stdout carries only the result.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` if set, otherwise the given level.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
