//! Hardware metrics collection
//!
//! Cross-platform CPU and memory readings via sysinfo, with
//! platform-specific fallbacks for clock speeds. A snapshot never
//! fails hard: anything unreadable degrades to zero or "Unknown".

pub mod cpu;
pub mod memory;
pub mod snapshot;

pub use cpu::CpuMetrics;
pub use memory::MemoryMetrics;
pub use snapshot::HardwareSnapshot;
