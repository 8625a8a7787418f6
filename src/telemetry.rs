//! Tracing subscriber setup for host applications.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static TRACING_READY: OnceLock<()> = OnceLock::new();

/// Install a stderr fmt subscriber filtered at the configured level.
///
/// An unparsable level falls back to `info`. Later calls are no-ops, as is a
/// call made after the host installed its own global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_READY.get_or_init(|| {
        let filter =
            EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(level = %config.level, "tracing initialized");
        }
    });
}
