//! CLI configuration.
//!
//! Reads `~/.config/newschat/config.toml`; the `NEWSCHAT_API_URL`
//! environment variable overrides the file, and a missing file falls back
//! to the local development backend.

use std::path::Path;

use anyhow::{Context, Result};
use newschat_infrastructure::paths::NewschatPaths;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the chat backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = NewschatPaths::config_file().context("could not resolve the config path")?;
        let mut config = Self::from_path(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads the configuration from an explicit path; a missing file yields
    /// the defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse configuration at {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NEWSCHAT_API_URL")
            && !url.trim().is_empty()
        {
            self.api_base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();

        let config = Config::from_path(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"http://chat.example:8080\"\n").unwrap();

        let config = Config::from_path(&path).unwrap();

        assert_eq!(config.api_base_url, "http://chat.example:8080");
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::from_path(&path).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [").unwrap();

        assert!(Config::from_path(&path).is_err());
    }
}
