//! Fixed-Capacity Sliding Windows for Metric History
//!
//! ## Overview
//!
//! Each metric the dashboard charts (latency, throughput, jitter) keeps its
//! own window of the most recent samples. The window is a strict FIFO of
//! fixed capacity `N`:
//!
//! - O(1) append at the tail
//! - When full, the oldest entry is evicted from the head first
//! - Entries are never reordered, so iteration is chronological
//!
//! ```text
//! HistoryBuffer<4> after appending a..f:
//!
//!   head                  tail
//!    ↓                     ↓
//!  ┌─────┬─────┬─────┬─────┐
//!  │  c  │  d  │  e  │  f  │     a, b evicted
//!  └─────┴─────┴─────┴─────┘
//! ```
//!
//! Storage is a `heapless::Deque`, so capacity is fixed at compile time and the
//! window never reallocates. Labels are supplied by the caller and are opaque
//! to the buffer.
//!
//! ## Usage Example
//!
//! ```rust
//! use accelscope_core::buffer::HistoryBuffer;
//!
//! let mut latency: HistoryBuffer<3> = HistoryBuffer::new();
//! for (i, v) in [90.0, 95.0, 100.0, 105.0].into_iter().enumerate() {
//!     latency.append(format!("t{i}"), v);
//! }
//!
//! assert_eq!(latency.len(), 3);
//! assert_eq!(latency.values(), vec![95.0, 100.0, 105.0]);
//! assert_eq!(latency.last().map(|p| p.label.as_str()), Some("t3"));
//! ```

use heapless::Deque;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::MAX_HISTORY;
use crate::sample::Sample;

/// One charted point: wall-clock label plus metric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub label: String,
    pub value: f64,
}

/// Fixed-capacity FIFO of [`HistoryPoint`]s
///
/// ## Internal Invariants
///
/// - `len() <= N` after every operation
/// - Iteration order equals insertion order
#[derive(Debug, Clone)]
pub struct HistoryBuffer<const N: usize> {
    points: Deque<HistoryPoint, N>,
}

impl<const N: usize> HistoryBuffer<N> {
    /// Creates an empty window
    pub const fn new() -> Self {
        Self {
            points: Deque::new(),
        }
    }

    /// Append at the tail, evicting the oldest point when full
    pub fn append(&mut self, label: impl Into<String>, value: f64) {
        if self.points.is_full() {
            self.points.pop_front();
        }
        // Room was made above, so this cannot hand the point back
        let _ = self.points.push_back(HistoryPoint {
            label: label.into(),
            value,
        });
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.is_full()
    }

    /// Maximum number of points retained
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent point
    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> + '_ {
        self.points.iter()
    }

    /// Values oldest to newest
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Drop every point
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<const N: usize> Default for HistoryBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Serialize for HistoryBuffer<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter())
    }
}

/// The three independent metric windows charted by the dashboard
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricHistory {
    pub latency: HistoryBuffer<MAX_HISTORY>,
    pub throughput: HistoryBuffer<MAX_HISTORY>,
    pub jitter: HistoryBuffer<MAX_HISTORY>,
}

impl MetricHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample's metrics under a shared label
    pub fn record(&mut self, label: &str, sample: &Sample) {
        self.latency.append(label, sample.latency_us);
        self.throughput.append(label, sample.throughput_mbps);
        self.jitter.append(label, sample.jitter_us);
    }
}
