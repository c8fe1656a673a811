use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::gemini::GeminiConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod gemini;
pub mod languages;
pub mod storage;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Capacity of the app <-> ui channels
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let channel_capacity = env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Config {
            gemini: GeminiConfig::new(),
            storage: StorageConfig::new(),
            ui: UiConfig::default(),

            channel_capacity,
        }
    }

    /// Load a JSON config file, falling back to env defaults when it is missing.
    /// Secrets from the environment always override the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let data = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&data)?;
        config.gemini.apply_env();
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ui": { "color": false } }"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.ui.color);
        assert!(config.ui.show_ruby);
        assert_eq!(config.ui.max_examples, 3);
        assert_eq!(config.gemini.text_model, "gemini-3-flash-preview");
        assert_eq!(config.storage.key, storage::STATE_KEY);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::ParseError(_))));
    }
}
