//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber filtered at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`. Returns `false` if a
/// global subscriber was already installed.
#[must_use]
pub fn init(level: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_ok()
}
