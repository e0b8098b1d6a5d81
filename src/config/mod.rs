//! On-disk configuration, stored as `config.json` in the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::StoreResult;
use crate::utils;

fn default_notification_limit() -> usize {
    4
}

/// User-tunable settings. Absent fields fall back to defaults so older
/// config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory CSV exports land in; the data directory's `exports/`
    /// subdirectory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// How many transient notifications are kept at once.
    #[serde(default = "default_notification_limit")]
    pub notification_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: None,
            notification_limit: default_notification_limit(),
        }
    }
}

/// Loads and saves the configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join("config.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, or returns defaults when it does not exist.
    pub fn load(&self) -> StoreResult<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes `config` atomically, creating the data directory when missing.
    pub fn save(&self, config: &Config) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
