use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::TripDashError;
use crate::replay::PlaybackSpeed;

const CONFIG_DIR_NAME: &str = "tripdash";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_format: OutputFormat,
    pub playback_speed: PlaybackSpeed,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            playback_speed: PlaybackSpeed::X1,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, TripDashError> {
        Ok(dirs::config_dir()
            .ok_or(TripDashError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Reads the user's config file, `None` when it has not been written yet
    pub fn from_local_file() -> Result<Option<Self>, TripDashError> {
        Self::from_file(&Self::default_path()?)
    }

    pub fn from_file(config_path: &Path) -> Result<Option<Self>, TripDashError> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return Ok(None);
        }

        let file = std::fs::File::open(config_path)
            .map_err(|e| TripDashError::ConfigIOError { source: e })?;
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|e| TripDashError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<(), TripDashError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), TripDashError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TripDashError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| TripDashError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| TripDashError::ConfigSerializeError { source: e })
    }
}
