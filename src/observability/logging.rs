//! # Structured Logging
//!
//! Logging setup on the tracing ecosystem. `RUST_LOG` wins when set; otherwise
//! the configured level applies. Initialization is idempotent so both the
//! binary and individual tests can call it without coordination.

use crate::config::ObservabilityConfig;
use crate::errors::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber from configuration.
///
/// Returns `Ok(())` even when a subscriber is already installed; the first
/// caller wins, later callers keep the existing one.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let installed = if config.json_logs {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .with_target(true)
            .try_init()
    } else {
        fmt().with_env_filter(filter).with_target(true).try_init()
    };

    if installed.is_ok() {
        tracing::debug!(
            service_name = %config.service_name,
            log_level = %config.log_level,
            json = config.json_logs,
            "Logging initialized"
        );
    }

    Ok(())
}
