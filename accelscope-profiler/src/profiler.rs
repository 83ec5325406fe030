//! Benchmark runner
//!
//! Each test pulls samples straight from a [`SampleGenerator`] at a fixed
//! configuration. Runs are sized by sample count rather than wall-clock
//! duration, so a seeded source gives the same report every time.

use serde::{Deserialize, Serialize};

use accelscope_core::{Configuration, RandomSource, Sample, SampleGenerator, Timestamp};

use crate::report::{JitterReport, LatencyReport, ThroughputReport, ValidationReport, Verdict};
use crate::summary::SummaryStats;
use crate::{JITTER_TARGET_US, LATENCY_TARGET_US};

/// Iterations between progress messages
const PROGRESS_EVERY: usize = 100;

/// Sample spacing reported on generated timestamps (ms)
const SAMPLE_SPACING_MS: Timestamp = 100;

/// How many samples each test takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPlan {
    pub latency_iterations: usize,
    pub jitter_samples: usize,
    pub throughput_samples: usize,
}

impl Default for ValidationPlan {
    fn default() -> Self {
        // 30 s at 10 Hz for jitter, 30 s at 2 Hz for throughput
        Self {
            latency_iterations: 1000,
            jitter_samples: 300,
            throughput_samples: 60,
        }
    }
}

/// Runs the validation tests against one configuration
pub struct Profiler<R> {
    config: Configuration,
    generator: SampleGenerator<R>,
    taken: u64,
}

impl<R: RandomSource> Profiler<R> {
    pub fn new(config: Configuration, random: R) -> Self {
        Self {
            config,
            generator: SampleGenerator::new(random),
            taken: 0,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn next_sample(&mut self) -> Sample {
        let timestamp = self.taken * SAMPLE_SPACING_MS;
        self.taken += 1;
        self.generator.generate(&self.config, timestamp)
    }

    /// Mean latency over `iterations` transfers; target < 100 µs
    pub fn run_latency_test(&mut self, iterations: usize) -> LatencyReport {
        log::info!("running latency benchmark ({iterations} iterations)");

        let mut latencies = Vec::with_capacity(iterations);
        for i in 0..iterations {
            latencies.push(self.next_sample().latency_us);
            if (i + 1) % PROGRESS_EVERY == 0 {
                log::info!("  progress: {}/{iterations}", i + 1);
            }
        }

        let stats = SummaryStats::from_values(&latencies);
        let verdict = Verdict::from_bool(iterations > 0 && stats.mean < LATENCY_TARGET_US);
        log::info!(
            "latency: mean {:.2}us p99 {:.2}us -> {verdict}",
            stats.mean,
            stats.p99
        );

        LatencyReport {
            iterations,
            stats,
            verdict,
        }
    }

    /// Sample-to-sample latency change; target max < 10 µs
    pub fn run_jitter_test(&mut self, samples: usize) -> JitterReport {
        log::info!("running jitter analysis ({samples} samples)");

        let latencies: Vec<f64> = (0..samples).map(|_| self.next_sample().latency_us).collect();
        let jitter: Vec<f64> = latencies.windows(2).map(|w| (w[1] - w[0]).abs()).collect();

        let stats = SummaryStats::from_values(&jitter);
        let verdict = Verdict::from_bool(!jitter.is_empty() && stats.max < JITTER_TARGET_US);
        log::info!(
            "jitter: mean {:.2}us max {:.2}us -> {verdict}",
            stats.mean,
            stats.max
        );

        JitterReport {
            samples,
            stats,
            verdict,
        }
    }

    pub fn run_throughput_test(&mut self, samples: usize) -> ThroughputReport {
        log::info!("running throughput benchmark ({samples} samples)");

        let throughputs: Vec<f64> = (0..samples)
            .map(|_| self.next_sample().throughput_mbps)
            .collect();
        let stats = SummaryStats::from_values(&throughputs);
        log::info!(
            "throughput: mean {:.0} MB/s (min {:.0}, max {:.0})",
            stats.mean,
            stats.min,
            stats.max
        );

        ThroughputReport { samples, stats }
    }

    /// Latency, jitter and throughput tests in sequence
    pub fn run_full_validation(&mut self, plan: &ValidationPlan) -> ValidationReport {
        log::info!(
            "starting validation: {} cores, window {}, {} MB/s",
            self.config.active_cores,
            self.config.window_size,
            self.config.data_rate
        );

        let report = ValidationReport {
            config: self.config,
            latency: self.run_latency_test(plan.latency_iterations),
            jitter: self.run_jitter_test(plan.jitter_samples),
            throughput: self.run_throughput_test(plan.throughput_samples),
        };

        if report.passed() {
            log::info!("validation complete: all targets met");
        } else {
            log::warn!("validation complete: one or more targets missed");
        }
        report
    }
}
