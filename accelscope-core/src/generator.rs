//! Synthetic Sample Generator
//!
//! ## Overview
//!
//! There is no hardware behind the dashboard. Each tick, the generator maps
//! the current [`Configuration`] plus a handful of uniform draws to one
//! [`Sample`]:
//!
//! ```text
//! base_latency = 50 + (8 - active_cores) * 10        µs
//! latency      = base_latency + uniform(0, 20)       µs
//! throughput   = active_cores * 250 + uniform(0, 100) MB/s
//! jitter       = uniform(0, 5)                       µs
//! ```
//!
//! Fewer active cores raise the latency floor; throughput scales linearly
//! with parallelism. All three components always report `active`; no fault
//! injection is modelled.
//!
//! ## Determinism
//!
//! `generate` is pure up to its [`RandomSource`]: no I/O, no clock reads
//! (the caller supplies the timestamp). Draw order is fixed (latency,
//! throughput, jitter), so a seeded source yields a reproducible stream.
//!
//! ```rust
//! use accelscope_core::{Configuration, SampleGenerator};
//! use accelscope_core::random::FixedRandom;
//!
//! let mut generator = SampleGenerator::new(FixedRandom::zero());
//! let sample = generator.generate(&Configuration::default(), 0);
//! assert_eq!(sample.latency_us, 90.0);
//! assert_eq!(sample.throughput_mbps, 1000.0);
//! ```

use crate::config::Configuration;
use crate::constants::config::ACTIVE_CORES_MAX;
use crate::constants::model::*;
use crate::random::RandomSource;
use crate::sample::{ComponentHealth, Sample};
use crate::time::Timestamp;

/// Latency floor for a given core count (µs)
pub fn base_latency_us(active_cores: u8) -> f64 {
    let idle = ACTIVE_CORES_MAX.saturating_sub(active_cores);
    LATENCY_FLOOR_US + f64::from(idle) * LATENCY_PER_IDLE_CORE_US
}

/// Deterministic part of the throughput for a given core count (MB/s)
pub fn base_throughput_mbps(active_cores: u8) -> f64 {
    f64::from(active_cores) * THROUGHPUT_PER_CORE_MBPS
}

/// Produces one [`Sample`] per call
#[derive(Debug, Clone)]
pub struct SampleGenerator<R> {
    random: R,
}

impl<R: RandomSource> SampleGenerator<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Draw one sample for `config` stamped with `timestamp`
    pub fn generate(&mut self, config: &Configuration, timestamp: Timestamp) -> Sample {
        let latency_us = base_latency_us(config.active_cores)
            + self.random.uniform(0.0, LATENCY_NOISE_US);
        let throughput_mbps = base_throughput_mbps(config.active_cores)
            + self.random.uniform(0.0, THROUGHPUT_NOISE_MBPS);
        let jitter_us = self.random.uniform(0.0, JITTER_MAX_US);

        Sample {
            timestamp,
            latency_us,
            throughput_mbps,
            jitter_us,
            health: ComponentHealth::all_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SeededRandom};
    use crate::sample::ComponentStatus;

    fn config_with_cores(active_cores: u8) -> Configuration {
        Configuration {
            active_cores,
            ..Configuration::default()
        }
    }

    #[test]
    fn zero_draws_hit_the_floor() {
        let mut generator = SampleGenerator::new(FixedRandom::zero());
        let sample = generator.generate(&Configuration::default(), 1000);

        assert_eq!(sample.timestamp, 1000);
        assert_eq!(sample.latency_us, 90.0);
        assert_eq!(sample.throughput_mbps, 1000.0);
        assert_eq!(sample.jitter_us, 0.0);
    }

    #[test]
    fn midpoint_draws() {
        let mut generator = SampleGenerator::new(FixedRandom::new(0.5));
        let sample = generator.generate(&config_with_cores(8), 0);

        assert_eq!(sample.latency_us, 60.0);
        assert_eq!(sample.throughput_mbps, 2050.0);
        assert_eq!(sample.jitter_us, 2.5);
    }

    #[test]
    fn each_core_lowers_latency_floor_and_raises_throughput() {
        for k in 1..8u8 {
            assert_eq!(base_latency_us(k) - base_latency_us(k + 1), 10.0);
            assert_eq!(base_throughput_mbps(k + 1) - base_throughput_mbps(k), 250.0);
        }
        assert_eq!(base_latency_us(1), 120.0);
        assert_eq!(base_latency_us(8), 50.0);
    }

    #[test]
    fn seeded_samples_stay_in_model_bounds() {
        let mut generator = SampleGenerator::new(SeededRandom::from_seed(99));
        let config = config_with_cores(3);

        for t in 0..500 {
            let s = generator.generate(&config, t);
            assert!((100.0..120.0).contains(&s.latency_us));
            assert!((750.0..850.0).contains(&s.throughput_mbps));
            assert!((0.0..5.0).contains(&s.jitter_us));
        }
    }

    #[test]
    fn components_always_active() {
        let mut generator = SampleGenerator::new(SeededRandom::from_seed(5));
        let s = generator.generate(&Configuration::default(), 0);
        assert_eq!(s.health.link, ComponentStatus::Active);
        assert_eq!(s.health.transfer_engine, ComponentStatus::Active);
        assert_eq!(s.health.compute_engine, ComponentStatus::Active);
    }
}
