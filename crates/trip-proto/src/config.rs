use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::filter::FilterType;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the trip seed document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON document with points, destinations and offers.
    /// Defaults to `~/.local/share/trip/trip.json`.
    #[serde(default = "default_trip_file")]
    pub trip_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Filter applied when the board opens.
    #[serde(default)]
    pub default_filter: FilterType,
    #[serde(default = "default_show_keys")]
    pub show_keys: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// `tracing_subscriber` filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            trip_file: default_trip_file(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_filter: FilterType::default(),
            show_keys: default_show_keys(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

fn default_trip_file() -> PathBuf {
    platform::data_dir().join("trip.json")
}

fn default_show_keys() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    platform::data_dir().join("trip.log")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing a default config there first if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
