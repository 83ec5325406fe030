//! Time sources for the engine
//!
//! The engine never reads the clock directly. It asks a [`TimeSource`],
//! so tests can pin timestamps:
//! - [`SystemClock`] for live dashboards
//! - [`FixedTime`] for tests and replay

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::DateTime;

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of wall-clock time
pub trait TimeSource: Send + Sync {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `std::time::SystemTime`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven time source for testing
///
/// Clones share the same underlying instant, so a test can keep a handle
/// and advance the clock the engine is reading.
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: Arc<AtomicU64>,
}

impl FixedTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Arc::new(AtomicU64::new(timestamp)),
        }
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.timestamp.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.load(Ordering::SeqCst)
    }
}

/// Render a timestamp as the `HH:MM:SS` label used on chart axes (UTC)
pub fn format_label(timestamp: Timestamp) -> String {
    match DateTime::from_timestamp_millis(timestamp as i64) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => String::from("--:--:--"),
    }
}
