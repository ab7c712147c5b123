//! Memory metrics
//!
//! Values are derived from two raw counters, total and available bytes:
//! used = total - available, usage % = used / total * 100. A host
//! reporting zero total memory yields all-zero metrics instead of an
//! error or a division by zero.

use serde::{Deserialize, Serialize};
use sysinfo::System;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory readings for one snapshot, in GB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Total physical memory in GB
    pub total_gb: f64,
    /// Used memory in GB (total minus available)
    pub used_gb: f64,
    /// Available memory in GB
    pub available_gb: f64,
    /// Usage percentage, 0.0 to 100.0
    pub used_pct: f64,
}

impl MemoryMetrics {
    /// Read memory metrics from a refreshed [`System`].
    pub fn read(sys: &System) -> Self {
        Self::from_bytes(sys.total_memory(), sys.available_memory())
    }

    /// Derive metrics from raw total/available byte counters.
    ///
    /// Available is clamped to total so stale counter pairs cannot
    /// produce negative usage.
    pub fn from_bytes(total_bytes: u64, available_bytes: u64) -> Self {
        if total_bytes == 0 {
            return MemoryMetrics {
                total_gb: 0.0,
                used_gb: 0.0,
                available_gb: 0.0,
                used_pct: 0.0,
            };
        }

        let available_bytes = available_bytes.min(total_bytes);
        let used_bytes = total_bytes - available_bytes;

        let total_gb = total_bytes as f64 / BYTES_PER_GB;
        let available_gb = available_bytes as f64 / BYTES_PER_GB;
        let used_gb = used_bytes as f64 / BYTES_PER_GB;
        let used_pct = used_bytes as f64 / total_bytes as f64 * 100.0;

        MemoryMetrics {
            total_gb,
            used_gb,
            available_gb,
            used_pct,
        }
    }
}

/// Severity tier for a usage percentage, shared by the console
/// reporter and the TUI gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTier {
    /// Below 50%
    Ok,
    /// 50% to 75%
    Caution,
    /// 75% to 90%
    StrongCaution,
    /// 90% and above
    Critical,
}

impl UsageTier {
    pub fn from_pct(pct: f64) -> Self {
        if pct < 50.0 {
            UsageTier::Ok
        } else if pct < 75.0 {
            UsageTier::Caution
        } else if pct < 90.0 {
            UsageTier::StrongCaution
        } else {
            UsageTier::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_derivation_from_bytes() {
        let mem = MemoryMetrics::from_bytes(16 * GB, 4 * GB);
        assert!((mem.total_gb - 16.0).abs() < 1e-9);
        assert!((mem.available_gb - 4.0).abs() < 1e-9);
        assert!((mem.used_gb - 12.0).abs() < 1e-9);
        assert!((mem.used_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_yields_zeros() {
        let mem = MemoryMetrics::from_bytes(0, 0);
        assert_eq!(mem.total_gb, 0.0);
        assert_eq!(mem.used_gb, 0.0);
        assert_eq!(mem.available_gb, 0.0);
        assert_eq!(mem.used_pct, 0.0);
    }

    #[test]
    fn test_available_clamped_to_total() {
        // Stale counters can briefly report available > total
        let mem = MemoryMetrics::from_bytes(8 * GB, 9 * GB);
        assert_eq!(mem.used_gb, 0.0);
        assert_eq!(mem.used_pct, 0.0);
        assert!((mem.available_gb - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_usage_tiers() {
        assert_eq!(UsageTier::from_pct(0.0), UsageTier::Ok);
        assert_eq!(UsageTier::from_pct(49.9), UsageTier::Ok);
        assert_eq!(UsageTier::from_pct(50.0), UsageTier::Caution);
        assert_eq!(UsageTier::from_pct(74.9), UsageTier::Caution);
        assert_eq!(UsageTier::from_pct(75.0), UsageTier::StrongCaution);
        assert_eq!(UsageTier::from_pct(89.9), UsageTier::StrongCaution);
        assert_eq!(UsageTier::from_pct(90.0), UsageTier::Critical);
        assert_eq!(UsageTier::from_pct(100.0), UsageTier::Critical);
    }
}
