use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::DEFAULT_ACTIVITY_LIMIT;

const APP_NAME: &str = "goalboard";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Number of goals generated at startup.
    pub fixture_goal_count: usize,
    /// Seed for fixture generation. Random when unset.
    pub fixture_seed: Option<u64>,
    /// Maximum entries shown in the activity feed.
    pub activity_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixture_goal_count: 10,
            fixture_seed: None,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    /// A missing file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("{}, using default config", e);
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            let config = Self::default();
            match config.save(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "Wrote default config"),
                Err(e) => tracing::warn!("Failed to write default config: {:#}", e),
            }
            return config;
        }

        match Self::try_load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
