//! Rolling Statistics over the History Windows
//!
//! ## Overview
//!
//! Every tick the aggregator recomputes all derived figures from scratch out
//! of the current window contents. No running sums or incremental state are
//! kept, so [`StatsAggregator::compute`] is a pure function of its inputs.
//!
//! | Statistic | Definition | Empty window |
//! |-----------|------------|--------------|
//! | `avg_latency_us` | arithmetic mean of the latency window | 0 |
//! | `min_latency_us` / `max_latency_us` | extremes of the latency window | 0 |
//! | `p99_latency_us` | sorted latency at rank `floor(0.99 * n)` | 0 |
//! | `max_jitter_us` | maximum of the jitter window | 0 |
//! | `speedup` | `150 / avg_latency_us` | 0 |
//! | `dma_bandwidth_gbps` | `latest_throughput / 1000 * 8` | n/a |
//!
//! ## Percentile Convention
//!
//! The tail latency is a *nearest-rank* percentile: the window is sorted
//! ascending and indexed at `floor(p * n)`. No interpolation is applied. At
//! small `n` this lands on the maximum (for `n = 10`, rank 9 is the last
//! element), which is the dashboard's established behaviour and is kept
//! as-is. The rank is clamped to `n - 1` so `p = 1.0` stays in bounds.

use serde::{Deserialize, Serialize};

use crate::buffer::HistoryBuffer;
use crate::constants::model::{BITS_PER_BYTE, CPU_BASELINE_US, MB_PER_GB, P99_RANK};

/// Derived figures published with every snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatistics {
    /// Mean latency over the window (µs)
    pub avg_latency_us: f64,
    /// Smallest latency in the window (µs)
    pub min_latency_us: f64,
    /// Largest latency in the window (µs)
    pub max_latency_us: f64,
    /// Nearest-rank 99th percentile latency (µs)
    pub p99_latency_us: f64,
    /// Largest jitter in the window (µs)
    pub max_jitter_us: f64,
    /// CPU baseline divided by mean latency
    pub speedup: f64,
    /// DMA bandwidth implied by the latest throughput (GB/s)
    pub dma_bandwidth_gbps: f64,
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maximum, 0 for an empty slice
pub fn max_or_zero(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Minimum, 0 for an empty slice
pub fn min_or_zero(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Nearest-rank percentile: sorted value at `floor(p * n)`, 0 when empty
pub fn nearest_rank_percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p * sorted.len() as f64).floor() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// Ratio of the CPU baseline to `avg_latency_us`, 0 when there is no latency
pub fn speedup(avg_latency_us: f64) -> f64 {
    if avg_latency_us > 0.0 {
        CPU_BASELINE_US / avg_latency_us
    } else {
        0.0
    }
}

/// Bandwidth in GB/s for a throughput in MB/s
pub fn dma_bandwidth_gbps(throughput_mbps: f64) -> f64 {
    throughput_mbps / MB_PER_GB * BITS_PER_BYTE
}

/// Stateless recomputation of [`DerivedStatistics`]
pub struct StatsAggregator;

impl StatsAggregator {
    /// Recompute every statistic from the current windows
    ///
    /// The throughput window is accepted for symmetry with the charted
    /// metrics; bandwidth is derived from `latest_throughput_mbps` alone.
    pub fn compute<const N: usize>(
        latency: &HistoryBuffer<N>,
        _throughput: &HistoryBuffer<N>,
        jitter: &HistoryBuffer<N>,
        latest_throughput_mbps: f64,
    ) -> DerivedStatistics {
        let latencies = latency.values();
        let avg_latency_us = mean(&latencies);

        DerivedStatistics {
            avg_latency_us,
            min_latency_us: min_or_zero(&latencies),
            max_latency_us: max_or_zero(&latencies),
            p99_latency_us: nearest_rank_percentile(&latencies, P99_RANK),
            max_jitter_us: max_or_zero(&jitter.values()),
            speedup: speedup(avg_latency_us),
            dma_bandwidth_gbps: dma_bandwidth_gbps(latest_throughput_mbps),
        }
    }
}
