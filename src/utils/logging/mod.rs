//! Logging setup
//!
//! Library code only emits `tracing` events; binaries call [`init_tracing`] once.

use crate::config::LoggingConfig;
use crate::utils::error::{AccessError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_ascii_lowercase()))
        .map_err(|e| AccessError::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| AccessError::config(format!("Failed to install logger: {}", e)))
}
