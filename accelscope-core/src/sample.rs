//! One tick's raw measurement
//!
//! Samples are immutable once created; ownership moves into the history
//! buffers when the engine appends them.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Health of one accelerator component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ComponentStatus {
    Active = 0,
    Idle = 1,
    Error = 2,
}

impl ComponentStatus {
    /// Lowercase wire name
    pub const fn name(&self) -> &'static str {
        match self {
            ComponentStatus::Active => "active",
            ComponentStatus::Idle => "idle",
            ComponentStatus::Error => "error",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Health of the three components on the data path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    /// PCIe link
    pub link: ComponentStatus,
    /// DMA transfer engine
    pub transfer_engine: ComponentStatus,
    /// Compute kernel
    pub compute_engine: ComponentStatus,
}

impl ComponentHealth {
    /// All three components active
    pub const fn all_active() -> Self {
        Self {
            link: ComponentStatus::Active,
            transfer_engine: ComponentStatus::Active,
            compute_engine: ComponentStatus::Active,
        }
    }
}

/// Raw metrics for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// When the sample was taken (ms since epoch)
    pub timestamp: Timestamp,
    /// Round-trip latency (µs)
    pub latency_us: f64,
    /// Sustained throughput (MB/s)
    pub throughput_mbps: f64,
    /// Latency jitter (µs)
    pub jitter_us: f64,
    /// Component health at sample time
    pub health: ComponentHealth,
}
