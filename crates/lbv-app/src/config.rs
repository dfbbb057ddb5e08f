//! Session configuration loaded from YAML.

use std::path::{Path, PathBuf};

use lbv_core::SpeedUnit;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_DISPLAY};

/// Front-end settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Maximum entries kept per session history.
    pub history_capacity: usize,
    /// Entries shown by a bare `history` command.
    pub history_display: usize,
    pub default_unit: SpeedUnit,
    /// Bundle used when none is given on the command line.
    pub bundle_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_display: DEFAULT_HISTORY_DISPLAY,
            default_unit: SpeedUnit::default(),
            bundle_path: None,
        }
    }
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.history_capacity == 0 {
            return Err(AppError::Config(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.history_display == 0 {
            return Err(AppError::Config(
                "history_display must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Bundle path from the command line, falling back to the config.
    pub fn resolve_bundle(&self, cli: Option<&Path>) -> AppResult<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.bundle_path.clone())
            .ok_or(AppError::NoBundle)
    }
}
