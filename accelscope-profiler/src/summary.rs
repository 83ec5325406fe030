//! Descriptive statistics over one benchmark run

use serde::{Deserialize, Serialize};

use accelscope_core::stats::{max_or_zero, mean, nearest_rank_percentile};

/// Summary of a series of measurements
///
/// Percentiles use the same nearest-rank rule as the dashboard's tail
/// latency. Every field is 0 for an empty series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator); 0 below two values
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p99: f64,
}

impl SummaryStats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let avg = mean(&sorted);
        let stdev = if n < 2 {
            0.0
        } else {
            let sum_sq: f64 = sorted.iter().map(|v| (v - avg).powi(2)).sum();
            (sum_sq / (n - 1) as f64).sqrt()
        };

        Self {
            count: n,
            mean: avg,
            median,
            stdev,
            min: sorted[0],
            max: max_or_zero(&sorted),
            p95: nearest_rank_percentile(&sorted, 0.95),
            p99: nearest_rank_percentile(&sorted, 0.99),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_all_zero() {
        assert_eq!(SummaryStats::from_values(&[]), SummaryStats::default());
    }

    #[test]
    fn single_value() {
        let stats = SummaryStats::from_values(&[42.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.p99, 42.0);
    }

    #[test]
    fn known_series() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SummaryStats::from_values(&values);

        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        // sum of squares 32 over n - 1 = 7
        assert!((stats.stdev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn percentiles_use_floor_rank() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let stats = SummaryStats::from_values(&values);
        assert_eq!(stats.p95, 95.0);
        assert_eq!(stats.p99, 99.0);
    }
}
