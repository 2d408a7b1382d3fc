//! # Structured Logging
//!
//! Environment-aware tracing setup for binaries. Library code only emits
//! through `tracing` macros; initializing a subscriber is the application's
//! call, so this lives behind an explicit init function.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with an `RUST_LOG`-style filter.
///
/// Safe to call more than once; later calls are no-ops, and an already
/// installed global subscriber (e.g. from a test harness) is left in place.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let initialized = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        if initialized.is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}
