//! System configuration
//!
//! Loads and saves the sf config file (TOML). Missing file means defaults;
//! values are validated on load so a bad file fails fast with a clear error.

use anyhow::{Context, Result};
use pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Demo pacing and simulated-network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Base simulated provider latency (ms)
    pub latency_ms: u64,
    /// Random jitter added on top of the base latency (ms)
    pub jitter_ms: u64,
    /// Delay between simulated keystrokes (ms)
    pub typing_delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            latency_ms: 150,
            jitter_ms: 100,
            typing_delay_ms: 60,
        }
    }
}

/// Full sf configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Listing pipeline parameters
    pub pipeline: PipelineConfig,
    /// Demo settings
    pub demo: DemoConfig,
}

impl SystemConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.pipeline
            .validate()
            .context("invalid [pipeline] section")?;
        Ok(())
    }
}

/// Path of the config file (~/.config/shopfeed/config.toml)
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shopfeed").join("config.toml"))
}

/// Load configuration, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    match config_file_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(SystemConfig::default()),
    }
}

/// Load configuration from an explicit path
pub fn load_from(path: &Path) -> Result<SystemConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Example config file contents
pub fn example_config() -> String {
    let example = SystemConfig::default();
    // Defaults always serialize
    toml::to_string_pretty(&example).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = SystemConfig::default();
        assert_eq!(config.pipeline.debounce_ms, 200);
        assert_eq!(config.pipeline.page_size, 20);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline]\npage_size = 10\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.pipeline.page_size, 10);
        assert_eq!(config.pipeline.debounce_ms, 200);
        assert_eq!(config.demo.latency_ms, 150);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline]\npage_size = 0\n").unwrap();

        assert!(load_from(&path).is_err());
    }

    #[test]
    fn test_example_round_trips() {
        let example = example_config();
        let config: SystemConfig = toml::from_str(&example).unwrap();
        assert!(config.validate().is_ok());
    }
}
