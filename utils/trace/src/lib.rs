use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(ParseLogFormatError { format: other.to_string() }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown log format: {format}")]
pub struct ParseLogFormatError {
    pub format: String,
}

/// Installs the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: &str, format: LogFormat) -> Result<(), TracingInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|source| TracingInitError::InvalidFilter { source })?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().compact()),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().flatten_event(true)),
        ),
    }
    .map_err(|source| TracingInitError::SetGlobalDefault { source })?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid filter config")]
    InvalidFilter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to set global default subscriber")]
    SetGlobalDefault {
        #[from]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}
