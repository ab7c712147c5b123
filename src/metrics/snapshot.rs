//! Point-in-time hardware snapshot and its console rendering

use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use sysinfo::System;

use super::cpu::CpuMetrics;
use super::memory::{MemoryMetrics, UsageTier};

/// One capture of CPU and memory state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareSnapshot {
    /// Local capture time
    pub captured_at: DateTime<Local>,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
}

impl HardwareSnapshot {
    /// Capture a fresh snapshot. Never fails: unreadable counters
    /// degrade to zeros or "Unknown".
    pub fn capture() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        HardwareSnapshot {
            captured_at: Local::now(),
            cpu: CpuMetrics::read(&sys),
            memory: MemoryMetrics::read(&sys),
        }
    }

    /// Re-read counters into this snapshot, reusing nothing but the
    /// struct itself. Used by the watch loop and the metrics screen.
    pub fn refresh(&mut self) {
        *self = Self::capture();
    }

    /// Render the box-drawing console summary used by `info` and `watch`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let line = "─".repeat(58);
        out.push_str(&format!("┌{}┐\n", line));
        out.push_str(&format!(
            "│ {:<56} │\n",
            format!("Hardware Snapshot  {}", self.captured_at.format("%H:%M:%S"))
        ));
        out.push_str(&format!("├{}┤\n", line));

        out.push_str(&format!("│ {:<56} │\n", format!("CPU: {}", self.cpu.name)));
        out.push_str(&format!(
            "│ {:<56} │\n",
            format!(
                "Cores: {} physical / {} logical",
                self.cpu.physical_cores, self.cpu.logical_cpus
            )
        ));
        out.push_str(&format!(
            "│ {:<56} │\n",
            format!(
                "Clock: {} MHz (max {} MHz)",
                self.cpu.current_mhz, self.cpu.max_mhz
            )
        ));

        out.push_str(&format!("├{}┤\n", line));

        let mem = &self.memory;
        out.push_str(&format!(
            "│ {:<56} │\n",
            format!(
                "RAM: {:.1} GB used / {:.1} GB total ({:.1} GB free)",
                mem.used_gb, mem.total_gb, mem.available_gb
            )
        ));

        // Colored spans confuse width formatting, so pad by hand
        let bar = usage_bar(mem.used_pct, 40);
        let label = format!("{:>5.1}%", mem.used_pct);
        let tier = UsageTier::from_pct(mem.used_pct);
        let plain_len = bar.chars().count() + 1 + label.chars().count();
        let pad = " ".repeat(56usize.saturating_sub(plain_len));
        out.push_str(&format!(
            "│ {} {}{} │\n",
            tier_colored(&bar, tier),
            tier_colored(&label, tier),
            pad
        ));

        out.push_str(&format!("└{}┘", line));
        out
    }
}

/// Build a fixed-width █/░ usage bar for a percentage
pub fn usage_bar(pct: f64, width: usize) -> String {
    let pct = pct.clamp(0.0, 100.0);
    let filled = (pct / 100.0 * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn tier_colored(text: &str, tier: UsageTier) -> ColoredString {
    match tier {
        UsageTier::Ok => text.green(),
        UsageTier::Caution => text.yellow(),
        UsageTier::StrongCaution => text.truecolor(255, 165, 0),
        UsageTier::Critical => text.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_does_not_panic() {
        // Must succeed on any host, including ones with no readable counters
        let snap = HardwareSnapshot::capture();
        assert!(snap.memory.used_pct >= 0.0);
        assert!(snap.memory.used_pct <= 100.0);
    }

    #[test]
    fn test_usage_bar_widths() {
        assert_eq!(usage_bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(usage_bar(50.0, 10), "█████░░░░░");
        assert_eq!(usage_bar(100.0, 10), "██████████");
        // Out-of-range values clamp instead of overflowing the bar
        assert_eq!(usage_bar(150.0, 10), "██████████");
        assert_eq!(usage_bar(-5.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn test_json_shape() {
        let snap = HardwareSnapshot::capture();
        let json = serde_json::to_value(&snap).unwrap();
        assert!(json.get("cpu").is_some());
        assert!(json.get("memory").is_some());
        assert!(json["memory"].get("used_pct").is_some());
    }

    #[test]
    fn test_render_text_contains_sections() {
        let snap = HardwareSnapshot::capture();
        let text = snap.render_text();
        assert!(text.contains("CPU:"));
        assert!(text.contains("RAM:"));
        assert!(text.contains('%'));
    }
}
