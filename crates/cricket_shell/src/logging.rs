//! Tracing subscriber setup for shell binaries.

use tracing_subscriber::EnvFilter;

/// Default filter: shell lifecycle at info, page bridge lines at debug.
pub const DEFAULT_DIRECTIVE: &str = "info,CricketApp=debug";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Safe to call more than once.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
