use std::path::PathBuf;

use serde::Deserialize;

use crate::utils::constants::{DEFAULT_API_VERSION, DEFAULT_LOG_LEVEL};

/// ================================
/// Client settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub credentials_path: PathBuf,
    /// When absent the url is read from the api key issuer.
    pub api_url: Option<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// No timeout when absent.
    pub timeout_ms: Option<u64>,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default = "LogFormat::from_env")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL.to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
