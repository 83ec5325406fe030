//! Performance validation suite for the AccelScope accelerator model
//!
//! Checks the synthetic accelerator against its published targets:
//!
//! | Test | Measures | Target |
//! |------|----------|--------|
//! | Latency | per-transfer latency | mean < 100 µs |
//! | Jitter | change between consecutive latencies | max < 10 µs |
//! | Throughput | sustained MB/s | informational |
//!
//! ```no_run
//! use accelscope_core::{Configuration, SeededRandom};
//! use accelscope_profiler::{Profiler, ValidationPlan};
//!
//! let config = Configuration { active_cores: 8, window_size: 2048, data_rate: 2000.0, ..Default::default() };
//! let mut profiler = Profiler::new(config, SeededRandom::from_seed(1));
//! let report = profiler.run_full_validation(&ValidationPlan::default());
//! println!("{report}");
//! ```

#![deny(unsafe_code)]

pub mod profiler;
pub mod report;
pub mod summary;

pub use profiler::{Profiler, ValidationPlan};
pub use report::{JitterReport, LatencyReport, ThroughputReport, ValidationReport, Verdict};
pub use summary::SummaryStats;

/// Mean latency must stay under this (µs)
pub const LATENCY_TARGET_US: f64 = 100.0;

/// Maximum jitter must stay under this (µs)
pub const JITTER_TARGET_US: f64 = 10.0;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
