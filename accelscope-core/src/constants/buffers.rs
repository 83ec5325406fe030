//! Buffer Capacities
//!
//! Both buffers are fixed-capacity and allocation-free after construction.

/// Samples retained per metric history window.
///
/// - 50 samples at the default 1 Hz tick = the last 50 seconds
/// - Matches the point count of the dashboard charts
pub const MAX_HISTORY: usize = 50;

/// Entries retained by the event log, newest first.
pub const MAX_LOG_ENTRIES: usize = 100;
