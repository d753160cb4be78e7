//! Log subscriber setup for binaries and tests embedding the engine.
//!
//! Only available with the `tracing-subscriber` feature. Library code logs
//! through `tracing` macros and never installs a subscriber itself.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// Installs a global subscriber. `RUST_LOG` overrides `settings.level`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.is_ok()
}
