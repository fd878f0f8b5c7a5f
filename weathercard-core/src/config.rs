use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::source::DatasetId;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// base_url = "http://127.0.0.1:5000"
/// default_dataset = "model"
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dashboard backend serving `/model_data` and `/forecast_data`.
    pub base_url: Option<String>,

    /// Optional default dataset id, "model" or "forecast".
    pub default_dataset: Option<String>,

    pub timeout_secs: Option<u64>,

    /// Host page template replacing the embedded one.
    pub template: Option<PathBuf>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn endpoint_for(&self, id: DatasetId) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), id.path())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Return the default dataset as a strongly-typed DatasetId, `model` when unset.
    pub fn default_dataset_id(&self) -> Result<DatasetId> {
        match self.default_dataset.as_deref() {
            None => Ok(DatasetId::Model),
            Some(s) => DatasetId::try_from(s).context(
                "Invalid default_dataset in config.\n\
                 Hint: run `weathercard configure` to pick one.",
            ),
        }
    }

    /// Store default dataset as string.
    pub fn set_default_dataset(&mut self, id: DatasetId) {
        self.default_dataset = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathercard", "weathercard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
