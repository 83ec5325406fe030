//! Time-Related Constants

// ===== TICK CADENCE =====

/// Default tick period (milliseconds).
///
/// One sample per second keeps the 50-point charts covering just under a minute.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Shortest tick period accepted from settings (milliseconds).
pub const MIN_TICK_INTERVAL_MS: u64 = 10;
