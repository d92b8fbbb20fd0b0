//! Application configuration.
//!
//! Values are layered: built-in defaults, then `config.toml` under the user's
//! config directory, then `GAME_REVIEWS_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ::config::{Config, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config dir holding our files.
pub const CONFIG_DIR: &str = "game-reviews";
/// Public mock endpoint the client talks to out of the box.
pub const DEFAULT_BASE_URL: &str = "https://652f4e4f0b8d8ddac0b25885.mockapi.io";
/// Collection holding game records.
pub const DEFAULT_COLLECTION: &str = "Games";

const ENV_PREFIX: &str = "GAME_REVIEWS";

const DEFAULT_CONFIG_TOML: &str = r#"# game-reviews configuration
#
# Every key can be overridden with a GAME_REVIEWS_<KEY> environment variable.

# Root of the REST API.
base_url = "https://652f4e4f0b8d8ddac0b25885.mockapi.io"

# Collection holding the game records.
collection = "Games"

# "remote" talks to base_url, "memory" keeps everything in process.
backend = "remote"
"#;

/// Which store implementation backs the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// HTTP store at `base_url`.
    Remote,
    /// Process-local store, lost on exit.
    Memory,
}

/// Resolved configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root URL of the REST API.
    pub base_url: String,
    /// Collection path segment under `base_url`.
    pub collection: String,
    /// Store implementation to use.
    pub backend: Backend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            backend: Backend::Remote,
        }
    }
}

impl AppConfig {
    /// Load from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load using `path` as the file layer. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("collection", DEFAULT_COLLECTION)?
            .set_default("backend", "remote")?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Full URL of the games collection.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.collection.trim_matches('/')
        )
    }
}

/// Default location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config file unless one already exists.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.backend, Backend::Remote);
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"http://localhost:3000/api/\"\nbackend = \"memory\"\n",
        )?;

        write_default_config(&path)?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.collection_url(), "http://localhost:3000/api/Games");
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(
            config.collection_url(),
            "https://652f4e4f0b8d8ddac0b25885.mockapi.io/Games"
        );
        Ok(())
    }
}
