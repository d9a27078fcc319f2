//! Startup configuration
//!
//! Timings and scoring are read once at startup, from TOML when a file is
//! provided. Missing keys fall back to the built-in defaults.
//!
//! ```toml
//! drop_interval_ms = 250
//! lock_grace_ms = 300
//! clear_animation_ms = 500
//! per_square_score = 1
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{CLEAR_ANIMATION_MS, DROP_INTERVAL_MS, LOCK_GRACE_MS, PER_SQUARE_SCORE};

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "BLOCK_DROP_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub drop_interval_ms: u32,
    pub lock_grace_ms: u32,
    pub clear_animation_ms: u32,
    pub per_square_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: DROP_INTERVAL_MS,
            lock_grace_ms: LOCK_GRACE_MS,
            clear_animation_ms: CLEAR_ANIMATION_MS,
            per_square_score: PER_SQUARE_SCORE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from the file named by `BLOCK_DROP_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::Invalid("drop_interval_ms must be positive"));
        }
        if self.lock_grace_ms == 0 {
            return Err(ConfigError::Invalid("lock_grace_ms must be positive"));
        }
        if self.clear_animation_ms == 0 {
            return Err(ConfigError::Invalid("clear_animation_ms must be positive"));
        }
        Ok(())
    }
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config: read failed: {}", e),
            ConfigError::Parse(e) => write!(f, "config: invalid toml: {}", e),
            ConfigError::Invalid(msg) => write!(f, "config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
