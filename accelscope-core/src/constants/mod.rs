//! Constants for AccelScope Core
//!
//! Every numeric value the engine depends on lives here, grouped by domain:
//! - **Config**: declared ranges and defaults of the tunable configuration
//! - **Model**: coefficients of the synthetic latency/throughput model
//! - **Buffers**: history window and event log capacities
//! - **Time**: tick cadence
//!
//! Names carry their unit (`_US`, `_MBPS`, `_MS`) so call sites read
//! unambiguously.

/// Declared ranges and defaults for the accelerator configuration.
pub mod config;

/// Coefficients of the synthetic metric model.
pub mod model;

/// History and log capacities.
pub mod buffers;

/// Tick cadence.
pub mod time;

pub use buffers::{MAX_HISTORY, MAX_LOG_ENTRIES};
pub use model::{CPU_BASELINE_US, P99_RANK};
pub use time::{DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
