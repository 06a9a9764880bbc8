use std::net::SocketAddr;

use thiserror::Error;
use utils_trace::LogFormat;

use crate::job::JobOptions;
use crate::translator::DEFAULT_MODEL;
use interfaces_openai_chat::index::OPENAI_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub job: JobOptions,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {name}")]
    Missing { name: &'static str },

    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },

    #[error("Invalid socket address for {name}: {source}")]
    InvalidAddr {
        name: &'static str,
        source: std::net::AddrParseError,
    },

    #[error("Invalid log format: {source}")]
    InvalidLogFormat {
        #[from]
        source: utils_trace::ParseLogFormatError,
    },
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing { name });

        let bool_or = |name: &'static str, default: bool| match optional(name) {
            None => Ok(default),
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidBool { name, value }),
        };

        let bind_addr: SocketAddr = optional("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { name: "BIND_ADDR", source })?;

        let log_format: LogFormat = match optional("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_model: optional("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: optional("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_URL.to_string()),
            job: JobOptions {
                prune_stale_dates: bool_or("PRUNE_STALE_HOROSCOPES", false)?,
                reuse_stored_translation: bool_or("REUSE_STORED_TRANSLATIONS", true)?,
            },
            bind_addr,
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
