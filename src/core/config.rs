//! core/config.rs
//! Player settings from `vinyl.toml`.
//!
//! Every field has a default, so the file is optional and may be partial.
//! Lookup: `$VINYL_CONFIG` if set, else `./vinyl.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "VINYL_CONFIG";
pub const CONFIG_FILE: &str = "vinyl.toml";

/// Ticks faster than this would just burn CPU polling the engine.
const MIN_TICK_MS: u64 = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// 0.0..=1.0
    pub initial_volume: f32,

    /// Engine position ticks + GUI polling interval.
    pub tick_ms: u64,

    /// Sleep timer buttons, in minutes.
    pub sleep_presets: Vec<u32>,

    /// Folder loaded on startup, if any.
    pub music_dir: Option<PathBuf>,

    /// File extensions treated as audio (no leading dot).
    pub extensions: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 0.8,
            tick_ms: 200,
            sleep_presets: vec![15, 25, 45, 60, 240],
            music_dir: None,
            extensions: ["mp3", "flac", "wav", "ogg", "m4a", "aac", "opus"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PlayerConfig {
    /// Load from `$VINYL_CONFIG` or `./vinyl.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    /// A missing file is not an error: you get the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        config.initial_volume = config.initial_volume.clamp(0.0, 1.0);
        config.sleep_presets.retain(|&m| m > 0);
        Ok(config)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(MIN_TICK_MS))
    }
}
