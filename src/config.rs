//! Configuration management for hwcheck
//!
//! Config file location:
//! - Linux: ~/.config/hwcheck/config.toml
//! - macOS: ~/Library/Application Support/hwcheck/config.toml
//! - Windows: %APPDATA%/hwcheck/config.toml
//!
//! You can override the config location by setting `HWCHECK_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metrics reporter settings
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// CPU benchmark settings
    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    /// Audio test settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Terminal UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("HWCHECK_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("io", "hwcheck", "hwcheck")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

/// Metrics reporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Seconds between automatic snapshot refreshes in `watch` and the
    /// system metrics screen.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    2
}

/// CPU benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Total stress-test duration in seconds
    #[serde(default = "default_bench_secs")]
    pub duration_secs: u64,

    /// Work slice budget in milliseconds; the worker yields between slices
    /// so progress events keep flowing.
    #[serde(default = "default_slice_ms")]
    pub slice_ms: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_bench_secs(),
            slice_ms: default_slice_ms(),
        }
    }
}

fn default_bench_secs() -> u64 {
    5
}

fn default_slice_ms() -> u64 {
    16
}

/// Audio test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Initial tone generator frequency in Hz
    #[serde(default = "default_tone_hz")]
    pub tone_hz: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            tone_hz: default_tone_hz(),
        }
    }
}

fn default_tone_hz() -> u32 {
    440
}

/// Terminal UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default virtual keyboard layout: "60", "tkl", or "full"
    #[serde(default = "default_keyboard_layout")]
    pub keyboard_layout: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keyboard_layout: default_keyboard_layout(),
        }
    }
}

fn default_keyboard_layout() -> String {
    "tkl".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.metrics.refresh_secs, 2);
        assert_eq!(config.benchmark.duration_secs, 5);
        assert_eq!(config.benchmark.slice_ms, 16);
        assert_eq!(config.audio.tone_hz, 440);
        assert_eq!(config.ui.keyboard_layout, "tkl");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();

        assert!(toml.contains("refresh_secs"));
        assert!(toml.contains("duration_secs"));
        assert!(toml.contains("tone_hz"));
        assert!(toml.contains("[ui]"));
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.benchmark.duration_secs = 9;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let parsed: Config = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.benchmark.duration_secs, 9);
        assert_eq!(parsed.audio.tone_hz, 440);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.metrics.refresh_secs = 10;
        config.ui.keyboard_layout = "full".to_string();

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.metrics.refresh_secs, 10);
        assert_eq!(parsed.ui.keyboard_layout, "full");
    }
}
