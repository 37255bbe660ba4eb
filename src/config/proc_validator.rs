//! Settings validation with aggregated errors.

use crate::config::settings::ClientSettings;

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_settings(settings: &ClientSettings) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    if settings.credentials_path.as_os_str().is_empty() {
        errors.push("credentials_path must not be empty".to_string());
    }

    if let Some(url) = &settings.api_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("api_url '{}' must start with http:// or https://", url));
        }
    }

    if settings.api_version.is_empty() || settings.api_version.contains('/') {
        errors.push(format!("api_version '{}' must be a single path segment", settings.api_version));
    }

    if settings.timeout_ms == Some(0) {
        errors.push("timeout_ms must be greater than zero".to_string());
    }

    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
