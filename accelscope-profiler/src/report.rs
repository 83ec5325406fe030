//! Benchmark results and pass/fail verdicts

use core::fmt;

use serde::{Deserialize, Serialize};

use accelscope_core::Configuration;

use crate::summary::SummaryStats;
use crate::{JITTER_TARGET_US, LATENCY_TARGET_US};

/// Outcome of a test against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("PASS"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// Per-transfer latency (µs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    pub iterations: usize,
    pub stats: SummaryStats,
    /// Pass when mean latency is under [`LATENCY_TARGET_US`]
    pub verdict: Verdict,
}

/// Absolute change between consecutive latency readings (µs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterReport {
    /// Latency readings taken; yields `samples - 1` jitter values
    pub samples: usize,
    pub stats: SummaryStats,
    /// Pass when maximum jitter is under [`JITTER_TARGET_US`]
    pub verdict: Verdict,
}

/// Sustained throughput (MB/s); informational only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputReport {
    pub samples: usize,
    pub stats: SummaryStats,
}

/// Result of a complete validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub config: Configuration,
    pub latency: LatencyReport,
    pub jitter: JitterReport,
    pub throughput: ThroughputReport,
}

impl ValidationReport {
    /// True when every test with a target passed
    pub fn passed(&self) -> bool {
        self.latency.verdict.passed() && self.jitter.verdict.passed()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.latency.stats;
        writeln!(f, "Latency ({} iterations):", self.latency.iterations)?;
        writeln!(f, "  Mean:   {:.2} us", l.mean)?;
        writeln!(f, "  Median: {:.2} us", l.median)?;
        writeln!(f, "  StdDev: {:.2} us", l.stdev)?;
        writeln!(f, "  P95:    {:.2} us", l.p95)?;
        writeln!(f, "  P99:    {:.2} us", l.p99)?;
        writeln!(f, "  Range:  {:.2} - {:.2} us", l.min, l.max)?;
        writeln!(
            f,
            "  {}: mean latency < {LATENCY_TARGET_US}us target",
            self.latency.verdict
        )?;

        let j = &self.jitter.stats;
        writeln!(f, "Jitter ({} samples):", self.jitter.samples)?;
        writeln!(f, "  Mean:   {:.2} us", j.mean)?;
        writeln!(f, "  Max:    {:.2} us", j.max)?;
        writeln!(f, "  StdDev: {:.2} us", j.stdev)?;
        writeln!(
            f,
            "  {}: max jitter < {JITTER_TARGET_US}us target",
            self.jitter.verdict
        )?;

        let t = &self.throughput.stats;
        writeln!(f, "Throughput ({} samples):", self.throughput.samples)?;
        writeln!(f, "  Mean: {:.0} MB/s", t.mean)?;
        writeln!(f, "  Min:  {:.0} MB/s", t.min)?;
        write!(f, "  Max:  {:.0} MB/s", t.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_names() {
        assert_eq!(Verdict::Pass.to_string(), "PASS");
        assert_eq!(serde_json::to_string(&Verdict::Fail).unwrap(), "\"fail\"");
        assert!(Verdict::from_bool(true).passed());
        assert!(!Verdict::from_bool(false).passed());
    }
}
