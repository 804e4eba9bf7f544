//! # Configuration
//!
//! TOML configuration for the shadowquest binary. Every section carries serde
//! defaults, so a partial file (or an empty one) loads cleanly.
//!
//! ```toml
//! [player]
//! name = "Shadow Monarch"
//!
//! [storage]
//! data_dir = "./data"
//! snapshot_key = "player"
//!
//! [progression]
//! cascade_level_ups = true
//! settle_quest_experience = true
//!
//! [system]
//! dark_mode = true
//! sound_enabled = true
//!
//! [logging]
//! level = "warn"
//! file = "shadowquest.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::progression::{SessionOptions, DEFAULT_PLAYER_NAME, DEFAULT_SNAPSHOT_KEY};

/// Default config file name used by the CLI.
pub const DEFAULT_CONFIG_PATH: &str = "shadowquest.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Name for a fresh player; ignored once a snapshot exists.
    #[serde(default = "default_player_name")]
    pub name: String,
}

fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshot_key: default_snapshot_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressionConfig {
    /// Keep levelling until experience drops below the threshold.
    #[serde(default = "default_true")]
    pub cascade_level_ups: bool,
    /// Check for a level-up after quest rewards are paid.
    #[serde(default = "default_true")]
    pub settle_quest_experience: bool,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            cascade_level_ups: true,
            settle_quest_experience: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            sound_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            player_name: self.player.name.clone(),
            cascade_level_ups: self.progression.cascade_level_ups,
            settle_quest_experience: self.progression.settle_quest_experience,
            dark_mode: self.system.dark_mode,
            sound_enabled: self.system.sound_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.player.name, "Shadow Monarch");
        assert_eq!(config.storage.snapshot_key, "player");
        assert!(config.progression.cascade_level_ups);
    }

    #[test]
    fn test_partial_sections_fill_in() {
        let config: Config = toml::from_str(
            r#"
            [player]
            name = "Jin-Woo"

            [progression]
            cascade_level_ups = false

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.player.name, "Jin-Woo");
        assert!(!config.progression.cascade_level_ups);
        assert!(config.progression.settle_quest_experience);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, None);
        assert_eq!(config.storage.data_dir, "./data");
    }

    #[test]
    fn test_create_default_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shadowquest.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).unwrap();
        let loaded = Config::load(path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_errors_mention_path() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[player\nname=").unwrap();
        let err = Config::load(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_session_options_mirror_config() {
        let mut config = Config::default();
        config.player.name = "Beru".to_string();
        config.progression.settle_quest_experience = false;
        config.system.sound_enabled = false;
        let options = config.session_options();
        assert_eq!(options.player_name, "Beru");
        assert!(options.cascade_level_ups);
        assert!(!options.settle_quest_experience);
        assert!(!options.sound_enabled);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_logging_levels_parse_as_filters() {
        let config = Config::default();
        assert_eq!(
            config.logging.level.parse::<log::LevelFilter>().ok(),
            Some(log::LevelFilter::Warn)
        );
        assert!("verbose".parse::<log::LevelFilter>().is_err());
    }
}
