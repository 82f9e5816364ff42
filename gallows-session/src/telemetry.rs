//! Logging bootstrap.

use gallows_core::config::GeneralConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the level filter: `RUST_LOG` when set, the configured level otherwise.
#[must_use]
pub fn env_filter(config: &GeneralConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber, writing to stderr so it never interleaves
/// with the game on stdout.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(config: &GeneralConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    let installed = if config.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    installed.is_ok()
}
