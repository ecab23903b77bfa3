//! Application configuration.
//!
//! Settings live in a TOML file under the user's config directory and can be
//! overridden with `GAMERACK_*` environment variables. A commented default
//! file is written on first run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const DEFAULT_CONFIG: &str = r#"# GameRack configuration.

# Image reference used for games added without cover art.
placeholder_image = "/placeholder.svg"

# Seed the library with the two demo entries on startup.
seed_samples = true

# Optional accent colour for the UI (one of: cyan, blue, green,
# yellow, magenta, red, white). Defaults to cyan when unset.
# accent = "cyan"
"#;

fn default_placeholder_image() -> String {
    "/placeholder.svg".to_string()
}

fn default_seed_samples() -> bool {
    true
}

/// Runtime settings for the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Image reference used when a draft does not supply one.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Whether to seed the demo library on startup.
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
    /// Optional named accent colour for the theme.
    #[serde(default)]
    pub accent: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            placeholder_image: default_placeholder_image(),
            seed_samples: default_seed_samples(),
            accent: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_file_path())
    }

    /// Load configuration from an explicit file path plus environment
    /// overrides. The file is optional; defaults apply when it is missing.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("GAMERACK"))
            .build()
            .context("failed to read configuration")?;
        settings
            .try_deserialize()
            .context("failed to parse configuration")
    }
}

/// Directory holding the configuration file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamerack")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Write the commented default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_file_path())
}

fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Default configuration written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.placeholder_image, "/placeholder.svg");
        assert!(config.seed_samples);
        assert!(config.accent.is_none());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "placeholder_image = \"/covers/none.png\"\nseed_samples = false\naccent = \"green\"\n",
        )?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.placeholder_image, "/covers/none.png");
        assert!(!config.seed_samples);
        assert_eq!(config.accent.as_deref(), Some("green"));
        Ok(())
    }

    #[test]
    fn default_file_is_written_once_and_parses() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.placeholder_image, "/placeholder.svg");

        // A second call must leave an existing file untouched.
        fs::write(&path, "seed_samples = false\n")?;
        ensure_default_config_at(&path)?;
        let config = AppConfig::load_from(&path)?;
        assert!(!config.seed_samples);
        Ok(())
    }
}
