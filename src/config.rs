//! Configuration management

use crate::error::{MindMendError, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted entry list.
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub analysis_delay_ms: u64,
    pub tip_count: usize,
    /// chrono format string for entry dates
    pub date_format: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".mindmend"));
        Self {
            log_file: data_dir.join("mindmend.log"),
            data_dir,
            storage_key: "mindmend-entries".to_string(),
            analysis_delay_ms: 1500,
            tip_count: 3,
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "MindMend", "MindMend")
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the config at `path`, writing the defaults there first if the file
    /// does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(MindMendError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(MindMendError::Config(
                "date_format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(MindMendError::Config(format!(
                "invalid date_format: {}",
                self.date_format
            )));
        }
        Ok(())
    }
}
