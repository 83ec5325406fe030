//! Synthetic Metric Model
//!
//! Coefficients of the per-tick sample formula:
//!
//! ```text
//! base_latency = LATENCY_FLOOR_US + (ACTIVE_CORES_MAX - cores) * LATENCY_PER_IDLE_CORE_US
//! latency      = base_latency + uniform(0, LATENCY_NOISE_US)
//! throughput   = cores * THROUGHPUT_PER_CORE_MBPS + uniform(0, THROUGHPUT_NOISE_MBPS)
//! jitter       = uniform(0, JITTER_MAX_US)
//! ```

// ===== LATENCY =====

/// Latency floor with every core enabled (µs).
pub const LATENCY_FLOOR_US: f64 = 50.0;

/// Latency added per disabled core (µs).
pub const LATENCY_PER_IDLE_CORE_US: f64 = 10.0;

/// Width of the uniform latency noise band (µs).
pub const LATENCY_NOISE_US: f64 = 20.0;

// ===== THROUGHPUT =====

/// Throughput contributed by each enabled core (MB/s).
pub const THROUGHPUT_PER_CORE_MBPS: f64 = 250.0;

/// Width of the uniform throughput noise band (MB/s).
pub const THROUGHPUT_NOISE_MBPS: f64 = 100.0;

// ===== JITTER =====

/// Upper bound of the uniform jitter draw (µs).
pub const JITTER_MAX_US: f64 = 5.0;

// ===== DERIVED STATISTICS =====

/// Reference CPU latency used for the speedup ratio (µs).
pub const CPU_BASELINE_US: f64 = 150.0;

/// Percentile used for tail latency, as a fraction.
///
/// Applied as nearest rank `floor(P99_RANK * n)` without interpolation.
pub const P99_RANK: f64 = 0.99;

/// Bits per byte, for MB/s to GB/s conversion.
pub const BITS_PER_BYTE: f64 = 8.0;

/// Megabytes per gigabyte.
pub const MB_PER_GB: f64 = 1000.0;
