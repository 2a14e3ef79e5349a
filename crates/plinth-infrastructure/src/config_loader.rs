//! Configuration file loading.
//!
//! Reads `config.toml` from the base directory, creating it with default
//! values on first run so the operator has a file to edit the shared
//! secret into.

use tokio::fs;
use tracing::info;

use plinth_core::config::ConsoleConfig;
use plinth_core::error::{PlinthError, Result};

use crate::paths::PlinthPaths;

/// Loads the console configuration, writing a default file if none exists.
pub async fn load_or_init(paths: &PlinthPaths) -> Result<ConsoleConfig> {
    let path = paths.config_file();
    if !path.exists() {
        let config = ConsoleConfig::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PlinthError::io(format!("Failed to create config dir: {e}")))?;
        }
        let serialized = toml::to_string_pretty(&config)?;
        fs::write(&path, serialized)
            .await
            .map_err(|e| PlinthError::io(format!("Failed to write config: {e}")))?;
        info!("created default config at {}", path.display());
        return Ok(config);
    }
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| PlinthError::io(format!("Failed to read config: {e}")))?;
    let config: ConsoleConfig = toml::from_str(&content)?;
    Ok(config)
}
