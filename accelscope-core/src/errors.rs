//! Error Types for the Telemetry Engine
//!
//! ## Design Philosophy
//!
//! The engine performs no fallible I/O on its hot path: generating a sample,
//! appending to history and recomputing statistics cannot fail. Errors only
//! arise at the edges:
//!
//! 1. **Configuration input**: a caller supplies a value outside its declared
//!    range. The engine converts these into clamps (see [`crate::config`]), but
//!    the error is still the unit of reporting, and strict callers can
//!    surface it directly via `PartialConfiguration::validate`.
//!
//! 2. **Lifecycle**: the tick scheduler needs a Tokio runtime to spawn into.
//!
//! 3. **Settings**: loading `EngineSettings` from disk or JSON.
//!
//! Empty history windows are *not* an error. Every statistic has a defined
//! zero fallback.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use accelscope_core::{ConfigError, PartialConfiguration};
//!
//! let patch = PartialConfiguration { active_cores: Some(12), ..Default::default() };
//! match patch.validate() {
//!     Ok(()) => {}
//!     Err(ConfigError::OutOfRange { field, .. }) => {
//!         // Report the offending field back to the operator
//!         assert_eq!(field, "activeCores");
//!     }
//!     Err(ConfigError::NonFinite { .. }) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for engine operations
pub type Result<T> = core::result::Result<T, EngineError>;

/// A supplied configuration field failed validation
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Value outside the field's declared range
    #[error("{field} = {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Wire name of the offending field (e.g. `activeCores`)
        field: &'static str,
        /// The value the caller supplied
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Value is NaN or infinite
    #[error("{field} is not a finite number")]
    NonFinite {
        /// Wire name of the offending field
        field: &'static str,
    },
}

impl ConfigError {
    /// Wire name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } | Self::NonFinite { field } => field,
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `start()` was called outside a Tokio runtime
    #[error("tick scheduler requires a running Tokio runtime")]
    NoRuntime,

    /// Settings could not be read or parsed
    #[error("invalid engine settings: {0}")]
    Settings(String),

    /// Strict configuration validation failed
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Settings(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Settings(err.to_string())
    }
}
