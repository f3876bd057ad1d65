//! Board configuration, loaded from TOML.
//!
//! Every key is optional; an empty file yields [`BoardConfig::default`].

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Security;
use crate::generator;
use crate::tick::{TickParams, MAX_STEP};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSection {
    /// Fixed RNG seed; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// How many catalog entries are on the board at start.
    pub seed_count: usize,
    /// Samples kept per sparkline.
    pub chart_len: usize,
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            seed: None,
            seed_count: 15,
            chart_len: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSection {
    pub interval_ms: u64,
    pub price_step: f64,
    pub change_step: f64,
    pub percent_step: f64,
    pub volume_step: u64,
    pub chart_jitter: f64,
}

impl Default for TickSection {
    fn default() -> Self {
        let params = TickParams::default();
        Self {
            interval_ms: 3_000,
            price_step: params.price_step,
            change_step: params.change_step,
            percent_step: params.percent_step,
            volume_step: params.volume_step,
            chart_jitter: params.chart_jitter,
        }
    }
}

impl TickSection {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn params(&self) -> TickParams {
        TickParams {
            price_step: self.price_step,
            change_step: self.change_step,
            percent_step: self.percent_step,
            volume_step: self.volume_step,
            chart_jitter: self.chart_jitter,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board: BoardSection,
    pub tick: TickSection,
    /// Replaces the built-in catalog when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub securities: Option<Vec<Security>>,
}

impl BoardConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.seed_count == 0 {
            return Err(ConfigError::Invalid("board.seed_count must be at least 1".into()));
        }
        if self.board.chart_len < 2 {
            return Err(ConfigError::Invalid(format!(
                "board.chart_len must be at least 2, got {}",
                self.board.chart_len
            )));
        }
        if self.tick.interval_ms == 0 {
            return Err(ConfigError::Invalid("tick.interval_ms must be positive".into()));
        }
        for (name, value) in [
            ("price_step", self.tick.price_step),
            ("change_step", self.tick.change_step),
            ("percent_step", self.tick.percent_step),
            ("chart_jitter", self.tick.chart_jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "tick.{name} must be a finite non-negative number, got {value}"
                )));
            }
            if value > MAX_STEP {
                return Err(ConfigError::Invalid(format!(
                    "tick.{name} must be at most {MAX_STEP}, got {value}"
                )));
            }
        }
        if let Some(securities) = &self.securities {
            if securities.is_empty() {
                return Err(ConfigError::Invalid("securities list is empty".into()));
            }
            let mut seen = HashSet::new();
            for security in securities {
                if security.symbol.trim().is_empty() {
                    return Err(ConfigError::Invalid("security with empty symbol".into()));
                }
                if !seen.insert(security.symbol.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "duplicate security symbol '{}'",
                        security.symbol
                    )));
                }
            }
        }
        Ok(())
    }

    /// Configured catalog, or the built-in one.
    pub fn catalog(&self) -> Vec<Security> {
        self.securities
            .clone()
            .unwrap_or_else(generator::default_catalog)
    }
}
