use std::path::Path;
use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::settings::{ClientSettings, LoggingConfig};

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("valid placeholder regex"));

/// Load and validate settings from a YAML file
pub async fn file_to_settings(path: &Path) -> Result<ClientSettings> {
    let content = tokio::fs::read_to_string(path).await?;

    let expanded = expand_env_vars(&content);
    parse_settings(expanded)
}

pub fn parse_settings(content: String) -> Result<ClientSettings> {
    let mut settings: ClientSettings = serde_yaml::from_str(&content)
        .inspect_err(|e| error!("parse settings error: {}", e))?;

    // Apply defaults
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::default());
    }
    if let Some(url) = settings.api_url.take() {
        settings.api_url = Some(url.trim_end_matches('/').to_owned());
    }

    debug!("validating settings ...");
    proc_validator::validate_settings(&settings)
        .map_err(|errs| anyhow!("settings are not valid: {}", errs.join("; ")))?;

    Ok(settings)
}

fn expand_env_vars(input: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string()
}
