//! Accelerator Configuration and the ConfigStore
//!
//! ## Overview
//!
//! The configuration is the only control surface of the simulated
//! accelerator. It is process-wide mutable state with no history: one current
//! value, replaced (never destroyed) through a single entry point,
//! [`ConfigStore::update`].
//!
//! ## Merge Semantics
//!
//! Updates are partial. A [`PartialConfiguration`] names only the fields the
//! caller wants to change; every field it leaves as `None` keeps its current
//! value:
//!
//! ```rust
//! use accelscope_core::config::{ConfigStore, PartialConfiguration};
//!
//! let mut store = ConfigStore::default();
//! let before = store.get();
//!
//! store.update(&PartialConfiguration { active_cores: Some(6), ..Default::default() });
//!
//! let after = store.get();
//! assert_eq!(after.active_cores, 6);
//! assert_eq!(after.window_size, before.window_size);
//! assert_eq!(after.data_rate, before.data_rate);
//! ```
//!
//! ## Validation Policy: Clamp-with-Log
//!
//! Every field has an inclusive range (see [`crate::constants::config`]). The
//! store never lets an out-of-range value through, because the generator uses
//! `active_cores` as a multiplier and as an offset from the core count:
//!
//! | Input | Outcome |
//! |-------|---------|
//! | Inside range | Applied as-is |
//! | Outside range | Clamped to the nearest bound, reported as a warning |
//! | NaN / infinite (`dataRate`) | Dropped, previous value kept, reported as a warning |
//!
//! Callers that prefer rejection can run [`PartialConfiguration::validate`]
//! first and surface the [`ConfigError`] themselves.

use serde::{Deserialize, Serialize};

use crate::constants::config::*;
use crate::errors::ConfigError;

/// Declared inclusive range of one configuration field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    /// Wire name of the field
    pub field: &'static str,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl FieldRange {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    /// Check a value against the range
    pub fn check(&self, value: f64) -> Result<f64, ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field: self.field });
        }
        if value < self.min || value > self.max {
            return Err(ConfigError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Nearest in-range value
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Range of `windowSize`
pub const WINDOW_SIZE_RANGE: FieldRange =
    FieldRange::new("windowSize", WINDOW_SIZE_MIN as f64, WINDOW_SIZE_MAX as f64);

/// Range of `activeCores`
pub const ACTIVE_CORES_RANGE: FieldRange =
    FieldRange::new("activeCores", ACTIVE_CORES_MIN as f64, ACTIVE_CORES_MAX as f64);

/// Range of `dataRate`
pub const DATA_RATE_RANGE: FieldRange =
    FieldRange::new("dataRate", DATA_RATE_MIN_MBPS, DATA_RATE_MAX_MBPS);

/// Range of `filterThreshold`
pub const FILTER_THRESHOLD_RANGE: FieldRange = FieldRange::new(
    "filterThreshold",
    FILTER_THRESHOLD_MIN as f64,
    FILTER_THRESHOLD_MAX as f64,
);

/// Current accelerator configuration
///
/// Always in range: the only way to change it is through [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Processing window in samples (256–4096)
    pub window_size: u32,
    /// Enabled compute cores (1–8)
    pub active_cores: u8,
    /// Host data rate in MB/s (100–2000)
    pub data_rate: f64,
    /// Filter threshold (10–500)
    pub filter_threshold: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE_DEFAULT,
            active_cores: ACTIVE_CORES_DEFAULT,
            data_rate: DATA_RATE_DEFAULT_MBPS,
            filter_threshold: FILTER_THRESHOLD_DEFAULT,
        }
    }
}

/// Partial update: `None` fields are left unchanged
///
/// Integer fields are carried as `i64` so that out-of-range requests
/// (negative core counts, oversized windows) survive deserialisation and
/// reach the clamp instead of failing to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_cores: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_threshold: Option<i64>,
}

impl PartialConfiguration {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.window_size.is_none()
            && self.active_cores.is_none()
            && self.data_rate.is_none()
            && self.filter_threshold.is_none()
    }

    /// Supplied fields paired with their ranges, in wire order
    fn fields(&self) -> [(FieldRange, Option<f64>); 4] {
        [
            (WINDOW_SIZE_RANGE, self.window_size.map(|v| v as f64)),
            (ACTIVE_CORES_RANGE, self.active_cores.map(|v| v as f64)),
            (DATA_RATE_RANGE, self.data_rate),
            (FILTER_THRESHOLD_RANGE, self.filter_threshold.map(|v| v as f64)),
        ]
    }

    /// Strict check: first supplied field that is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (range, value) in self.fields() {
            if let Some(value) = value {
                range.check(value)?;
            }
        }
        Ok(())
    }

    /// Every supplied field that is out of range
    pub fn violations(&self) -> Vec<ConfigError> {
        self.fields()
            .into_iter()
            .filter_map(|(range, value)| range.check(value?).err())
            .collect()
    }
}

impl From<Configuration> for PartialConfiguration {
    fn from(config: Configuration) -> Self {
        Self {
            window_size: Some(config.window_size.into()),
            active_cores: Some(config.active_cores.into()),
            data_rate: Some(config.data_rate),
            filter_threshold: Some(config.filter_threshold.into()),
        }
    }
}

/// A field whose requested value was replaced by the nearest bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    /// The validation failure that triggered the clamp
    pub error: ConfigError,
    /// Value actually stored
    pub applied: f64,
}

/// Outcome of one [`ConfigStore::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigUpdate {
    /// Configuration after the merge
    pub config: Configuration,
    /// `field=value` for every field that was written
    pub changed: Vec<String>,
    /// Fields written with a clamped value
    pub clamped: Vec<Clamped>,
    /// Fields ignored because the supplied value was not finite
    pub dropped: Vec<&'static str>,
}

impl ConfigUpdate {
    /// Human-readable description of the written fields
    pub fn summary(&self) -> String {
        if self.changed.is_empty() {
            String::from("Configuration updated: no changes")
        } else {
            format!("Configuration updated: {}", self.changed.join(", "))
        }
    }

    /// One message per clamped or dropped field
    pub fn warnings(&self) -> Vec<String> {
        let clamps = self.clamped.iter().map(|c| match c.error {
            ConfigError::OutOfRange { field, value, min, max } => format!(
                "{field}={value} outside [{min}, {max}], clamped to {}",
                c.applied
            ),
            ConfigError::NonFinite { field } => format!("{field} clamped to {}", c.applied),
        });
        let drops = self
            .dropped
            .iter()
            .map(|field| format!("{field} is not a finite number, keeping previous value"));
        clamps.chain(drops).collect()
    }
}

/// Holder of the current configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    current: Configuration,
}

impl ConfigStore {
    pub fn new(initial: Configuration) -> Self {
        Self { current: initial }
    }

    /// Current configuration
    pub fn get(&self) -> Configuration {
        self.current
    }

    /// Merge supplied fields over the current configuration
    ///
    /// Out-of-range values are clamped and non-finite values dropped; the
    /// returned [`ConfigUpdate`] records both so the caller can log them.
    pub fn update(&mut self, patch: &PartialConfiguration) -> ConfigUpdate {
        let mut outcome = ConfigUpdate {
            config: self.current,
            changed: Vec::new(),
            clamped: Vec::new(),
            dropped: Vec::new(),
        };

        if let Some(v) = patch.window_size {
            if let Some(applied) = outcome.resolve(WINDOW_SIZE_RANGE, v as f64) {
                self.current.window_size = applied as u32;
                outcome.record("windowSize", self.current.window_size);
            }
        }
        if let Some(v) = patch.active_cores {
            if let Some(applied) = outcome.resolve(ACTIVE_CORES_RANGE, v as f64) {
                self.current.active_cores = applied as u8;
                outcome.record("activeCores", self.current.active_cores);
            }
        }
        if let Some(v) = patch.data_rate {
            if let Some(applied) = outcome.resolve(DATA_RATE_RANGE, v) {
                self.current.data_rate = applied;
                outcome.record("dataRate", self.current.data_rate);
            }
        }
        if let Some(v) = patch.filter_threshold {
            if let Some(applied) = outcome.resolve(FILTER_THRESHOLD_RANGE, v as f64) {
                self.current.filter_threshold = applied as u32;
                outcome.record("filterThreshold", self.current.filter_threshold);
            }
        }

        outcome.config = self.current;
        outcome
    }
}

impl ConfigUpdate {
    /// Value to store for a supplied field, or `None` to keep the old one
    fn resolve(&mut self, range: FieldRange, value: f64) -> Option<f64> {
        match range.check(value) {
            Ok(v) => Some(v),
            Err(error @ ConfigError::OutOfRange { .. }) => {
                let applied = range.clamp(value);
                log::warn!("{error}; clamping to {applied}");
                self.clamped.push(Clamped { error, applied });
                Some(applied)
            }
            Err(ConfigError::NonFinite { field }) => {
                log::warn!("{field} is not finite; keeping previous value");
                self.dropped.push(field);
                None
            }
        }
    }

    fn record(&mut self, field: &str, value: impl core::fmt::Display) {
        self.changed.push(format!("{field}={value}"));
    }
}
