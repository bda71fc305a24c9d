//! Bot configuration resolution.

use anyhow::Context;
use homeward_core::{default_config_path, load_yaml, parse_yaml, save_yaml, BotConfig};
use include_dir::{include_dir, Dir};
use std::path::Path;

// Shipped defaults, embedded at compile time.
static CONFIGS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/configs");

/// Load the configuration from `path`, the user config file, or the embedded default.
pub fn load(path: Option<&Path>) -> anyhow::Result<BotConfig> {
    if let Some(path) = path {
        let config = load_yaml(path).with_context(|| format!("loading {}", path.display()))?;
        tracing::info!("Loaded config from {:?}", path);
        return Ok(config);
    }

    let user_path = default_config_path();
    if user_path.exists() {
        match load_yaml(&user_path) {
            Ok(config) => {
                tracing::info!("Loaded user config from {:?}", user_path);
                return Ok(config);
            }
            Err(e) => tracing::warn!("Failed to parse {:?}: {}, using defaults", user_path, e),
        }
    }

    Ok(embedded())
}

/// Write `config` to `path`, refusing to replace an existing file unless `force`.
pub fn write(config: &BotConfig, path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_yaml(path, config).with_context(|| format!("writing {}", path.display()))
}

/// The embedded `bot.yaml`, or built-in defaults if it is unusable.
pub fn embedded() -> BotConfig {
    let Some(content) = CONFIGS_DIR
        .get_file("bot.yaml")
        .and_then(|f| f.contents_utf8())
    else {
        tracing::warn!("Embedded bot.yaml not found, using defaults");
        return BotConfig::default();
    };

    match parse_yaml(content) {
        Ok(config) => {
            tracing::debug!("Loaded embedded config");
            config
        }
        Err(e) => {
            tracing::error!("Failed to parse embedded config: {}", e);
            BotConfig::default()
        }
    }
}
