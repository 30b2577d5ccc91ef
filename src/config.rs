//! Runtime configuration loaded from TOML.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [transport]
//! bind_address = "127.0.0.1:8001"
//! peer_address = "127.0.0.1:8000"
//! poll_interval_ms = 50
//!
//! [liveness]
//! warn_after_secs = 5
//! imminent_after_secs = 8
//! expire_after_secs = 10
//!
//! [layout]
//! lower_floor = "maps/lower.csv"
//! upper_floor = "maps/upper.csv"
//!
//! [dump]
//! directory = "frames"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::error::{ForecastError, ForecastResult};
use crate::io::Liveness;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "forecast.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub transport: TransportConfig,
    pub liveness: LivenessConfig,
    pub layout: LayoutConfig,
    pub dump: DumpConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransportConfig {
    pub bind_address: String,
    pub peer_address: String,
    pub poll_interval_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8001".to_string(),
            peer_address: "127.0.0.1:8000".to_string(),
            poll_interval_ms: 50,
        }
    }
}

impl TransportConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LivenessConfig {
    pub warn_after_secs: f64,
    pub imminent_after_secs: f64,
    pub expire_after_secs: f64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            warn_after_secs: 5.0,
            imminent_after_secs: 8.0,
            expire_after_secs: 10.0,
        }
    }
}

impl LivenessConfig {
    /// Builds the watchdog. Thresholds must be non-negative and non-decreasing.
    pub fn build(&self) -> ForecastResult<Liveness> {
        let thresholds = [
            self.warn_after_secs,
            self.imminent_after_secs,
            self.expire_after_secs,
        ];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ForecastError::Config(format!(
                "liveness thresholds must be non-negative, got {thresholds:?}"
            )));
        }
        if thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err(ForecastError::Config(format!(
                "liveness thresholds must not decrease, got {thresholds:?}"
            )));
        }
        Ok(Liveness::new(
            Duration::from_secs_f64(self.warn_after_secs),
            Duration::from_secs_f64(self.imminent_after_secs),
            Duration::from_secs_f64(self.expire_after_secs),
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub lower_floor: Option<PathBuf>,
    pub upper_floor: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DumpConfig {
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(text: &str) -> ForecastResult<Self> {
        basic_toml::from_str(text).map_err(|e| ForecastError::Config(e.to_string()))
    }

    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] if present, or falls back to
    /// defaults. An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> ForecastResult<Self> {
        if let Some(path) = path {
            let text = fs::read_to_string(path)?;
            let config = Self::from_toml(&text)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        match fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(text) => {
                let config = Self::from_toml(&text)?;
                info!("Loaded config from {DEFAULT_CONFIG_FILE}");
                Ok(config)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
