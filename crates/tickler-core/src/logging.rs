//! `tracing` subscriber bootstrap for hosts embedding the engine.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::constants::DEFAULT_LOG_LEVEL;

/// ## Summary
/// Builds the log filter for a configured level directive.
///
/// Falls back to `debug` when the directive does not parse.
#[must_use]
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|err| {
        tracing::warn!(level = %level, error = %err, "Invalid log level in config, keeping debug");
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    })
}

/// ## Summary
/// Installs a formatted `tracing` subscriber filtered at the configured level.
///
/// ## Errors
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::info!(level = %config.level, "Logging initialized");
    Ok(())
}
