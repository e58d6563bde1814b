use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::platform;
use crate::stream::AudioFormat;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stations: StationsConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Where the station list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsConfig {
    /// Path to a local TOML station file (highest priority).
    /// Defaults to `$XDG_CONFIG_HOME/radio/stations.toml`.
    #[serde(default = "default_stations_toml")]
    pub stations_toml: PathBuf,
    /// m3u playlist used when the TOML file is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m3u_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Accepted encodings, most preferred first.
    #[serde(default = "default_formats")]
    pub formats: Vec<AudioFormat>,
    #[serde(default = "default_volume")]
    pub default_volume: f32,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            stations_toml: default_stations_toml(),
            m3u_path: None,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            default_volume: default_volume(),
        }
    }
}

fn default_stations_toml() -> PathBuf {
    platform::config_dir().join("stations.toml")
}

fn default_formats() -> Vec<AudioFormat> {
    AudioFormat::DEFAULT_PREFERENCE.to_vec()
}

fn default_volume() -> f32 {
    0.5
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        if config.playback.formats.is_empty() {
            config.playback.formats = default_formats();
        }
        config.playback.default_volume = config.playback.default_volume.clamp(0.0, 1.0);
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
