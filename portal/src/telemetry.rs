//! Logging initialization

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use hm_shared::{LogFormat, LoggingConfig};

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow!("invalid log level {:?}: {}", config.level, e)),
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so they do not interleave with the prompts on stdout.
///
/// # Errors
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config)?)
        .with_writer(std::io::stderr)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
