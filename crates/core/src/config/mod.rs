use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub runner: RunnerConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing sections fall back to their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Configuration for the animation player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Milliseconds between automatic advances.
    pub speed_ms: u64,
    /// Start playing as soon as frames are loaded.
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: 1000,
            autoplay: true,
        }
    }
}

/// Limits applied by algorithm runners before any frame is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub max_input_len: usize,
    pub min_value: i64,
    pub max_value: i64,
}

impl RunnerConfig {
    pub fn value_range(&self) -> RangeInclusive<i64> {
        self.min_value..=self.max_value
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_input_len: 32,
            min_value: -999,
            max_value: 999,
        }
    }
}

/// Configuration for the tracing subscriber installed by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "playback": { "speed_ms": 250 } }"#).unwrap();

        assert_eq!(config.playback.speed_ms, 250);
        assert!(config.playback.autoplay);
        assert_eq!(config.runner, RunnerConfig::default());
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = AppConfig::from_json("{ playback: ").unwrap_err();
        assert!(matches!(err, crate::VisualiserError::Json(_)));
    }

    #[test]
    fn value_range_is_inclusive() {
        let runner = RunnerConfig {
            max_input_len: 4,
            min_value: -1,
            max_value: 1,
        };
        assert!(runner.value_range().contains(&1));
        assert!(!runner.value_range().contains(&2));
    }
}
