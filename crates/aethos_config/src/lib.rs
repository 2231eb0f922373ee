//! Configuration file for the aethos timing engine.
//!
//! ```toml
//! [crossing]
//! max_iterations = 40
//! tolerance_deg = 1e-4
//!
//! [design]
//! target_arc_deg = 88.0
//! max_lookback_days = 120.0
//!
//! [timing]
//! reference_time = "09:00:00"
//! max_hits = 32
//! ```
//!
//! Every table and key is optional; missing values take the built-in
//! defaults. Orb tables are not configurable.

use std::path::Path;

use aethos_search::{CrossingConfig, DEFAULT_MAX_HITS, DesignDateConfig};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a configuration file.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Settings for the daily timing bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSettings {
    /// Local time of day the transit snapshot is taken at (default 09:00).
    pub reference_time: NaiveTime,
    /// Bound on aspect hits per bundle (default 32).
    pub max_hits: usize,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            reference_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            max_hits: DEFAULT_MAX_HITS,
        }
    }
}

impl TimingSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_hits == 0 {
            return Err("max_hits must be > 0");
        }
        Ok(())
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AethosConfig {
    pub crossing: CrossingConfig,
    pub design: DesignDateConfig,
    pub timing: TimingSettings,
}

impl AethosConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.crossing.validate().map_err(ConfigError::Invalid)?;
        self.design.validate().map_err(ConfigError::Invalid)?;
        self.timing.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
