//! Service configuration.
//!
//! Loaded from `hub.toml` when present, then overridden by environment
//! variables. The encryption key override (`HUB_ENCRYPTION_KEY`) is passed
//! through to the credential store, which only consults it when the database
//! has no persisted key yet.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Complete hub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Path to the SQLite credential database
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_path() -> String {
    "hub.db".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            database_path: default_database_path(),
        }
    }
}

impl HubConfig {
    /// Loads configuration: `hub.toml` if it exists, env vars on top.
    pub fn load() -> Result<Self> {
        let mut config = match Path::new("hub.toml").exists() {
            true => Self::from_file("hub.toml")?,
            false => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
        toml::from_str(&raw).context("Failed to parse config file")
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("HUB_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Ok(path) = std::env::var("HUB_DATABASE_PATH") {
            self.database_path = path;
        }
    }

    /// Externally-injected encryption key, if any.
    pub fn encryption_key_override() -> Option<String> {
        std::env::var("HUB_ENCRYPTION_KEY").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.database_path, "hub.db");
    }

    #[test]
    fn test_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        std::fs::write(&path, "listen_addr = \"127.0.0.1:8080\"\n").unwrap();

        let config = HubConfig::from_file(&path).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        // Unspecified fields keep their defaults
        assert_eq!(config.database_path, "hub.db");
    }
}
