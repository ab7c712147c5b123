//! CPU metrics
//!
//! Reads name, core counts, and clock speeds using:
//! - Cross-platform: sysinfo crate
//! - Linux: cpufreq sysfs for max clock
//! - Windows: wmic, registry for max clock

use serde::{Deserialize, Serialize};
use sysinfo::System;
use tracing::warn;

#[cfg(target_os = "linux")]
use std::fs;
#[cfg(target_os = "linux")]
use std::path::Path;
#[cfg(target_os = "windows")]
use std::process::Command;

/// CPU readings for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuMetrics {
    /// Processor name (e.g., "AMD Ryzen 7 5800X")
    pub name: String,
    /// Number of physical cores
    pub physical_cores: usize,
    /// Number of logical CPUs
    pub logical_cpus: usize,
    /// Current clock in MHz, 0 when unreadable
    pub current_mhz: u64,
    /// Max rated clock in MHz, 0 when unreadable
    pub max_mhz: u64,
}

impl CpuMetrics {
    /// Read CPU metrics from a refreshed [`System`].
    ///
    /// The current clock falls back to the max clock when the live
    /// reading is unavailable; when both are unreadable the fields
    /// stay 0 and the name stays "Unknown".
    pub fn read(sys: &System) -> Self {
        let cpus = sys.cpus();

        if cpus.is_empty() {
            warn!("no CPUs visible to sysinfo, reporting zeros");
            return Self::unknown();
        }

        let first_cpu = &cpus[0];
        let name = {
            let brand = first_cpu.brand().trim();
            if brand.is_empty() {
                "Unknown".to_string()
            } else {
                brand.to_string()
            }
        };

        let logical_cpus = cpus.len();
        let physical_cores = sys.physical_core_count().unwrap_or(logical_cpus);

        let max_mhz = Self::max_clock_mhz().unwrap_or(0);
        let mut current_mhz = first_cpu.frequency();
        if current_mhz == 0 {
            current_mhz = max_mhz;
        }

        CpuMetrics {
            name,
            physical_cores,
            logical_cpus,
            current_mhz,
            max_mhz,
        }
    }

    /// All-zero metrics for hosts where nothing is readable
    pub fn unknown() -> Self {
        CpuMetrics {
            name: "Unknown".to_string(),
            physical_cores: 0,
            logical_cpus: 0,
            current_mhz: 0,
            max_mhz: 0,
        }
    }

    /// Max rated clock from cpufreq sysfs (Linux only)
    #[cfg(target_os = "linux")]
    fn max_clock_mhz() -> Option<u64> {
        let path = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";
        if !Path::new(path).exists() {
            return None;
        }

        let freq = fs::read_to_string(path).ok()?;
        let freq_khz = freq.trim().parse::<u64>().ok()?;
        Some(freq_khz / 1000)
    }

    /// Max rated clock from wmic, falling back to the registry (Windows only)
    #[cfg(target_os = "windows")]
    fn max_clock_mhz() -> Option<u64> {
        // wmic first: MaxClockSpeed is already in MHz
        if let Ok(output) = Command::new("wmic")
            .args(["cpu", "get", "MaxClockSpeed", "/format:csv"])
            .output()
        {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                for line in stdout.lines().skip(1) {
                    let parts: Vec<&str> = line.split(',').collect();
                    if parts.len() >= 2 {
                        if let Ok(freq) = parts[1].trim().parse::<u64>() {
                            if freq > 0 {
                                return Some(freq);
                            }
                        }
                    }
                }
            }
        }

        // Registry fallback: "    ~MHz    REG_DWORD    0x1e61"
        if let Ok(output) = Command::new("reg")
            .args([
                "query",
                "HKEY_LOCAL_MACHINE\\HARDWARE\\DESCRIPTION\\System\\CentralProcessor\\0",
                "/v",
                "~MHz",
            ])
            .output()
        {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                for line in stdout.lines() {
                    if line.contains("~MHz") {
                        let parts: Vec<&str> = line.split_whitespace().collect();
                        if let Some(hex_str) = parts.last() {
                            if let Ok(freq) =
                                u64::from_str_radix(hex_str.trim_start_matches("0x"), 16)
                            {
                                return Some(freq);
                            }
                        }
                    }
                }
            }
        }

        None
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    fn max_clock_mhz() -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_all_zeros() {
        let cpu = CpuMetrics::unknown();
        assert_eq!(cpu.name, "Unknown");
        assert_eq!(cpu.physical_cores, 0);
        assert_eq!(cpu.logical_cpus, 0);
        assert_eq!(cpu.current_mhz, 0);
        assert_eq!(cpu.max_mhz, 0);
    }

    #[test]
    fn test_serializes_to_json() {
        let cpu = CpuMetrics {
            name: "Test CPU".to_string(),
            physical_cores: 8,
            logical_cpus: 16,
            current_mhz: 3600,
            max_mhz: 4700,
        };

        let json = serde_json::to_string(&cpu).unwrap();
        assert!(json.contains("\"physical_cores\":8"));
        assert!(json.contains("\"current_mhz\":3600"));
    }
}
