//! Configuration file handling.
//!
//! Reads from `~/.config/newsstand/newsstand.toml`

use anyhow::{Context, Result};
use newsstand_core::icon::{DEFAULT_FAVICON_SERVICE, DEFAULT_PLACEHOLDER};
use newsstand_core::{IconSettings, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog language; selects the data file and the interface text.
    #[serde(default)]
    pub language: Language,
    /// Directory holding `hi.json`/`ml.json`, or an `http(s)://` base URL.
    #[serde(default = "default_catalog_location")]
    pub catalog_location: String,
    /// Where favorites and added entries are stored. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Prefix the website domain is appended to for fallback icons.
    #[serde(default = "default_favicon_service")]
    pub favicon_service: String,
    /// Icon used when no domain can be derived.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_catalog_location() -> String {
    "data".to_string()
}

fn default_favicon_service() -> String {
    DEFAULT_FAVICON_SERVICE.to_string()
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            catalog_location: default_catalog_location(),
            storage_path: None,
            favicon_service: default_favicon_service(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            if !is_custom {
                let config = Config::default();
                config.save_to(&config_path)?;
                tracing::info!("Created default config: {:?}", config);
                return Ok(config);
            } else {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
        }

        let config = Self::read(&config_path)?;
        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("newsstand").join("newsstand.toml"))
    }

    pub fn icon_settings(&self) -> IconSettings {
        IconSettings {
            favicon_service: self.favicon_service.clone(),
            placeholder: self.placeholder_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str(r#"language = "malayalam""#).unwrap();
        assert_eq!(config.language, Language::Malayalam);
        assert_eq!(config.catalog_location, "data");
        assert_eq!(config.favicon_service, DEFAULT_FAVICON_SERVICE);
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_save_and_load_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("newsstand.toml");
        let config = Config {
            catalog_location: "https://news.example/catalogs".to_string(),
            storage_path: Some(dir.path().join("storage.json")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load(Some(path)).unwrap(), config);
    }

    #[test]
    fn test_missing_custom_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml"))).is_err());
    }
}
