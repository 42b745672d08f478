//! Logging initialization
//!
//! One-call tracing setup shared by every binary in the workspace. The
//! filter comes from `RUST_LOG` when set, otherwise the given default.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Safe to call more than once: later calls are no-ops, which keeps test
/// binaries from panicking when several tests initialize logging.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
