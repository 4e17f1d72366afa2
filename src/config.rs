//! Run configuration.
//!
//! Settings come from three layers: built-in defaults, an optional
//! TOML file, and the command line, in increasing precedence. This
//! module owns the first two; the binary applies the third.

use crate::analysis::QualityThresholds;
use crate::capture::{DetectorConfig, DetectorConfigError};
use crate::output::{OutputFormat, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of warm-up samples.
pub const DEFAULT_MIN_SAMPLES: usize = 100;
/// Default field delimiter.
pub const DEFAULT_DELIMITER: &str = ",";

/// Configuration for the debiasing filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Output encoding.
    pub format: OutputFormat,
    /// Output cap in bytes; 0 means unbounded.
    pub length: u64,
    /// Zero-based column holding the sample.
    pub column: usize,
    /// Field separator.
    pub delimiter: String,
    /// Samples averaged before the first bit is committed.
    pub min_samples: usize,
    /// Bytes between forced flushes; 0 disables periodic flushing.
    pub buffer_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            length: 0,
            column: 0,
            delimiter: DEFAULT_DELIMITER.to_string(),
            min_samples: DEFAULT_MIN_SAMPLES,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FilterConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The field delimiter is the empty string.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,
    /// The `[detect]` settings are inconsistent.
    #[error(transparent)]
    Detector(#[from] DetectorConfigError),
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
///
/// ```toml
/// [filter]
/// format = "base64"
/// column = 1
/// min_samples = 500
///
/// [detect]
/// width = 640
/// height = 480
///
/// [quality]
/// max_bit_bias = 0.02
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[filter]` table.
    #[serde(default)]
    pub filter: FilterConfig,
    /// `[detect]` table.
    #[serde(default)]
    pub detect: DetectorConfig,
    /// `[quality]` table, used by the filter's end-of-run report.
    #[serde(default)]
    pub quality: QualityThresholds,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.filter.validate()?;
        config.detect.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.format, OutputFormat::Hex);
        assert_eq!(config.length, 0);
        assert_eq!(config.column, 0);
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.min_samples, 100);
        assert_eq!(config.buffer_size, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.filter, FilterConfig::default());
        assert_eq!(config.detect, DetectorConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = FileConfig::from_toml(
            r#"
            [filter]
            format = "raw"
            column = 1

            [detect]
            trim_top = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.filter.format, OutputFormat::Raw);
        assert_eq!(config.filter.column, 1);
        assert_eq!(config.filter.min_samples, DEFAULT_MIN_SAMPLES);
        assert_eq!(config.detect.trim_top, 4);
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let result = FileConfig::from_toml("[filter]\ndelimiter = \"\"\n");
        assert!(matches!(result, Err(ConfigError::EmptyDelimiter)));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = FileConfig::from_toml("[filter]\nformat = \"octal\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file("/nonexistent/decay-rng.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
