use crate::performance::PerformanceThresholds;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Reporter settings loaded from a TOML file. Every field is optional and
/// falls back to the built-in defaults.
///
/// ```toml
/// [performance]
/// high_ms = 1000
/// medium_ms = 200
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct ReporterConfig {
    #[serde(default)]
    performance: PerformanceConfig,
}

#[derive(Deserialize, Debug)]
struct PerformanceConfig {
    #[serde(default = "default_high_ms")]
    high_ms: u64,

    #[serde(default = "default_medium_ms")]
    medium_ms: u64,
}

fn default_high_ms() -> u64 {
    1000
}

fn default_medium_ms() -> u64 {
    200
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            high_ms: default_high_ms(),
            medium_ms: default_medium_ms(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(error) => write!(f, "failed to read reporter config: {}", error),
            ConfigError::Parse(error) => write!(f, "failed to parse reporter config: {}", error),
        }
    }
}

impl ReporterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }

    pub fn thresholds(&self) -> PerformanceThresholds {
        PerformanceThresholds::with_limits(self.performance.high_ms, self.performance.medium_ms)
    }
}
