//! CLI configuration.
//!
//! Read from `~/.config/aura/config.toml`, then overridden by `AURA_*`
//! environment variables (e.g. `AURA_API_BASE`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE: &str = "http://localhost:8000";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("aura"))
        .unwrap_or_else(|| PathBuf::from("~/.aura"))
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuraConfig {
    /// Directory holding the events and session slots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the chat relay
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl AuraConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("aura");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!(error = %e, path = %config_path.display(), "could not create default config");
            }
        }

        Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("AURA"))
            .build()
            .context("Could not read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    /// Write a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# aura configuration

# Where events are stored:
# data_dir = \"{}\"

# Chat relay used by `aura ask` (or set AURA_API_BASE):
# api_base = \"{}\"
",
            default_data_dir().display(),
            DEFAULT_API_BASE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write {}", path.display()))?;

        Ok(())
    }
}
