//! Tracing setup
//!
//! Log lines go to stderr so they never mix with command output on stdout.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::settings::Settings;

/// Build the filter: `RUST_LOG` wins, then the configured level
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(settings: &Settings) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %settings.log_level, "Tracing initialized");
    }
}
