//! Pipeline configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page_size must be between 1 and {max}, got {got}")]
    PageSizeOutOfRange { got: usize, max: usize },

    #[error("debounce_ms must be at most {max}, got {got}")]
    DebounceTooLong { got: u64, max: u64 },
}

/// Tunable parameters for one listing pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Quiescence window for query debouncing, in milliseconds
    pub debounce_ms: u64,
    /// Items requested per page
    pub page_size: usize,
}

impl PipelineConfig {
    /// Maximum accepted page size
    pub const MAX_PAGE_SIZE: usize = 100;
    /// Maximum accepted debounce window (ms)
    pub const MAX_DEBOUNCE_MS: u64 = 5_000;

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > Self::MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange {
                got: self.page_size,
                max: Self::MAX_PAGE_SIZE,
            });
        }
        if self.debounce_ms > Self::MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong {
                got: self.debounce_ms,
                max: Self::MAX_DEBOUNCE_MS,
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            page_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let config = PipelineConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            page_size: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            debounce_ms: 60_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
