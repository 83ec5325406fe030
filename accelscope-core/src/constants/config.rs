//! Configuration Ranges and Defaults
//!
//! The control surface of the notional accelerator. Every field has an
//! inclusive range; updates outside it are clamped to the nearest bound.

// ===== WINDOW SIZE =====

/// Smallest processing window, in samples.
pub const WINDOW_SIZE_MIN: u32 = 256;

/// Largest processing window, in samples.
pub const WINDOW_SIZE_MAX: u32 = 4096;

/// Default processing window, in samples.
pub const WINDOW_SIZE_DEFAULT: u32 = 1024;

// ===== COMPUTE CORES =====

/// Fewest compute cores that may be enabled.
///
/// Must stay >= 1: the core count scales throughput and sets the latency floor.
pub const ACTIVE_CORES_MIN: u8 = 1;

/// Number of compute cores on the device.
pub const ACTIVE_CORES_MAX: u8 = 8;

/// Cores enabled at power-on.
pub const ACTIVE_CORES_DEFAULT: u8 = 4;

// ===== DATA RATE =====

/// Lowest host data rate (MB/s).
pub const DATA_RATE_MIN_MBPS: f64 = 100.0;

/// Highest host data rate (MB/s).
pub const DATA_RATE_MAX_MBPS: f64 = 2000.0;

/// Default host data rate (MB/s).
pub const DATA_RATE_DEFAULT_MBPS: f64 = 1000.0;

// ===== FILTER THRESHOLD =====

/// Lowest filter threshold.
pub const FILTER_THRESHOLD_MIN: u32 = 10;

/// Highest filter threshold.
pub const FILTER_THRESHOLD_MAX: u32 = 500;

/// Default filter threshold.
pub const FILTER_THRESHOLD_DEFAULT: u32 = 100;
