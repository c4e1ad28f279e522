//! User configuration for the review engine
//!
//! Read from `~/.config/flashlingo/config.toml` (platform config dir):
//!
//! ```toml
//! [review]
//! interval_days = [1, 2, 4, 8, 16, 32]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::algorithm::DEFAULT_INTERVAL_DAYS;
use crate::flashcards::{FlashcardError, ReviewPolicy};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid review policy: {0}")]
    InvalidPolicy(#[from] FlashcardError),

    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlashlingoConfig {
    pub review: ReviewConfig,
}

/// The `[review]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Review interval in days for each tier; the last tier is terminal
    pub interval_days: Vec<u32>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            interval_days: DEFAULT_INTERVAL_DAYS.to_vec(),
        }
    }
}

impl FlashlingoConfig {
    /// Platform config path, e.g. ~/.config/flashlingo/config.toml
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("flashlingo").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.review_policy()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from `path` (or the default path), falling back to defaults
    /// when the file is missing or invalid
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("{}, using default configuration", e);
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn review_policy(&self) -> Result<ReviewPolicy> {
        Ok(ReviewPolicy::from_days(&self.review.interval_days)?)
    }
}
