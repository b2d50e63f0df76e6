//! Structured logging setup on the `tracing` stack.
//!
//! A merge run is a short-lived build step, so logging stays on stderr;
//! level and format are configurable through the CLI and the
//! `PARAMDIST_LOG` environment variable.

use crate::error::ParamError;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,
    /// Output format: json, text
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Initialize the logging system.
///
/// `PARAMDIST_LOG` takes precedence over the configured level, matching
/// the usual env-filter convention.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ParamError> {
    let filter = EnvFilter::try_from_env("PARAMDIST_LOG")
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            ParamError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid log level \"{}\": {}", config.level, e),
            ))
        })?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| {
        ParamError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize logging: {}", e),
        ))
    })
}
