//! Console configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_secret() -> String {
    "changeme".to_string()
}

/// Configuration loaded from `config.toml`.
///
/// The secret is the single shared string gating the locked -> unlocked
/// transition. It is not a per-user credential and not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Shared secret for the edit mode.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Override for the content document directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            data_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.secret, "changeme");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.secret, "changeme");
    }

    #[test]
    fn test_round_trip() {
        let config = ConsoleConfig {
            secret: "hunter2".to_string(),
            data_dir: Some(PathBuf::from("/tmp/content")),
        };
        let raw = toml::to_string(&config).unwrap();
        let back: ConsoleConfig = toml::from_str(&raw).unwrap();
        assert_eq!(back.secret, "hunter2");
        assert_eq!(back.data_dir, Some(PathBuf::from("/tmp/content")));
    }
}
