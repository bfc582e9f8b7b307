//! Machine configuration
//!
//! Settings can be built in code, or loaded from TOML:
//!
//! ```toml
//! max_cascade_hops = 10000
//! reject_cycles = true
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_cascade_hops must be greater than zero when set")]
    ZeroHopLimit,
}

/// Tuning knobs for a single machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Stop the cascade after this many hops. Unset means unbounded.
    #[serde(default)]
    pub max_cascade_hops: Option<usize>,

    /// Reject automatic transition tables that contain a cycle.
    #[serde(default)]
    pub reject_cycles: bool,
}

impl MachineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Loading machine config from {:?}", path);
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cascade_hops == Some(0) {
            return Err(ConfigError::ZeroHopLimit);
        }
        Ok(())
    }

    pub fn with_max_cascade_hops(mut self, hops: usize) -> Self {
        self.max_cascade_hops = Some(hops);
        self
    }

    pub fn with_reject_cycles(mut self, reject: bool) -> Self {
        self.reject_cycles = reject;
        self
    }
}
