//! Centralized path management.
//!
//! All on-disk locations derive from one base directory so tests can
//! redirect everything with a single override.

use std::path::{Path, PathBuf};

const BASE_DIR_NAME: &str = ".plinth";
const CONFIG_FILENAME: &str = "config.toml";
const CONTENT_DIR_NAME: &str = "content";

/// Resolves the console's file locations.
#[derive(Debug, Clone)]
pub struct PlinthPaths {
    base: PathBuf,
}

impl PlinthPaths {
    /// Creates a path resolver. `base_override` replaces the default
    /// `~/.plinth` base (used by tests and the `data_dir` config field).
    pub fn new(base_override: Option<&Path>) -> Self {
        let base = match base_override {
            Some(path) => path.to_path_buf(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(BASE_DIR_NAME),
        };
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `<base>/config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILENAME)
    }

    /// `<base>/content/`, one JSON document per collection key.
    pub fn content_dir(&self) -> PathBuf {
        self.base.join(CONTENT_DIR_NAME)
    }
}
