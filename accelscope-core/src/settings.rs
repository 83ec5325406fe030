//! Engine settings
//!
//! Everything the engine needs at construction that is not part of the live
//! accelerator configuration. Loaded from JSON:
//!
//! ```json
//! {
//!   "tickIntervalMs": 1000,
//!   "seed": 42,
//!   "initial": { "activeCores": 6, "windowSize": 2048 }
//! }
//! ```
//!
//! Every key is optional.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::PartialConfiguration;
use crate::constants::{DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Tick period in milliseconds (floored at 10 ms)
    pub tick_interval_ms: u64,
    /// Seed for the sample generator; entropy-seeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Overrides applied over the default configuration at startup
    pub initial: PartialConfiguration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            initial: PartialConfiguration::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Effective tick period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    #[test]
    fn empty_object_uses_defaults() {
        let settings = EngineSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn parses_all_keys() {
        let settings = EngineSettings::from_json_str(
            r#"{ "tickIntervalMs": 250, "seed": 42, "initial": { "activeCores": 6 } }"#,
        )
        .unwrap();

        assert_eq!(settings.tick_interval_ms, 250);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.initial.active_cores, Some(6));
    }

    #[test]
    fn tick_interval_has_a_floor() {
        let settings = EngineSettings::default().with_tick_interval_ms(1);
        assert_eq!(settings.tick_interval(), Duration::from_millis(10));
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = EngineSettings::from_json_str("{ tickIntervalMs: }").unwrap_err();
        assert!(matches!(err, EngineError::Settings(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{ "seed": 7 }"#).unwrap();

        let settings = EngineSettings::from_file(&path).unwrap();
        assert_eq!(settings.seed, Some(7));

        let missing = EngineSettings::from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(EngineError::Settings(_))));
    }
}
