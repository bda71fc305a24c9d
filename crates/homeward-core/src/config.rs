//! Bot configuration and YAML persistence.

use crate::battle::BattleConfig;
use crate::planner::PlannerConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Anchor route, `"x,y"` entries separated by `;`.
    pub anchors: String,
    pub planner: PlannerConfig,
    pub battle: BattleConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            anchors: "442,1594".into(),
            planner: PlannerConfig::default(),
            battle: BattleConfig::default(),
        }
    }
}

/// Get the app data directory for homeward.
pub fn get_app_data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("homeward")
}

/// Where the bot configuration lives unless overridden.
pub fn default_config_path() -> PathBuf {
    get_app_data_dir().join("bot.yaml")
}

/// Load a YAML file from disk.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> ConfigResult<T> {
    let content = fs::read_to_string(path)?;
    parse_yaml(&content)
}

/// Parse YAML from a string.
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    Ok(serde_yaml::from_str(content)?)
}

/// Save a value as YAML, creating parent directories.
pub fn save_yaml<T: Serialize>(path: impl AsRef<Path>, value: &T) -> ConfigResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(value)?)?;
    info!(?path, "Saved configuration");
    Ok(())
}
