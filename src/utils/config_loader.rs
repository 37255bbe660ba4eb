use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::proc_loader::file_to_settings;
use crate::config::settings::ClientSettings;

pub async fn run(config_path: &str) -> Result<ClientSettings> {
    let path = Path::new(config_path);
    file_to_settings(path)
        .await
        .map_err(|e| anyhow!("Invalid config {}: {}", config_path, e))
}
