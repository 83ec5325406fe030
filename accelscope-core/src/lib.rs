//! Metrics simulation and rolling-statistics engine for AccelScope
//!
//! Produces the live telemetry behind the FPGA accelerator dashboard:
//! one synthetic sample per tick, bounded history windows for charting,
//! derived statistics, and a user-visible event log.
//!
//! Key properties:
//! - Fixed-capacity windows (50 points per metric, 100 log entries)
//! - Ticks and configuration updates never interleave
//! - Randomness and time are injectable for deterministic runs
//!
//! ```no_run
//! use accelscope_core::{Engine, EngineSettings, PartialConfiguration};
//!
//! # #[tokio::main]
//! # async fn main() -> accelscope_core::Result<()> {
//! let engine = Engine::new(EngineSettings::default().with_seed(42));
//! engine.subscribe(|event| println!("{event:?}"));
//! engine.start()?;
//!
//! engine.update_config(&PartialConfiguration {
//!     active_cores: Some(8),
//!     ..Default::default()
//! });
//!
//! let snapshot = engine.snapshot();
//! println!("p99 = {:.1}us", snapshot.stats.p99_latency_us);
//! engine.stop();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event_log;
pub mod generator;
pub mod random;
pub mod sample;
pub mod scheduler;
pub mod settings;
pub mod stats;
pub mod time;

// Public API
pub use buffer::{HistoryBuffer, HistoryPoint, MetricHistory};
pub use config::{ConfigStore, ConfigUpdate, Configuration, PartialConfiguration};
pub use engine::{Engine, EngineEvent, EngineSnapshot, SubscriptionId};
pub use errors::{ConfigError, EngineError, Result};
pub use event_log::{EventLog, LogEntry, LogLevel};
pub use generator::SampleGenerator;
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use sample::{ComponentHealth, ComponentStatus, Sample};
pub use scheduler::{SchedulerState, TickScheduler};
pub use settings::EngineSettings;
pub use stats::{DerivedStatistics, StatsAggregator};
pub use time::{FixedTime, SystemClock, TimeSource, Timestamp};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
