use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::artifact::ErrorCorrection;
use crate::pipeline::CompactionStrategy;

const CONFIG_DIR_NAME: &str = "host-fingerprint";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Smallest QR code (version 1) is 21 modules wide.
const MIN_WIDTH: u32 = 21;
const MAX_WIDTH: u32 = 4096;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: CompactionStrategy,
    #[serde(default)]
    pub error_correction: ErrorCorrection,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_open_artifact")]
    pub open_artifact: bool,
    /// Directory for generated images; the system temp dir when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: CompactionStrategy::default(),
            error_correction: ErrorCorrection::default(),
            width: default_width(),
            open_artifact: default_open_artifact(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Load `path` when given, else the per-user config file if one exists,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::load_from_file(path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(ConfigError::Validation(format!(
                "width must be between {} and {} pixels",
                MIN_WIDTH, MAX_WIDTH
            )));
        }
        if let Some(dir) = &self.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "output_dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

const fn default_width() -> u32 {
    500
}

const fn default_open_artifact() -> bool {
    true
}
