//! Console layout configuration.
//!
//! A console is described by a small TOML file: the sample rate, the channel
//! strips (one table per strip, in slot order) and the meter geometry. The
//! default layout matches the classic two-strip desk: one mono strip with an
//! EQ section and one stereo strip without.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::channel::ChannelLayout;

/// Errors that can occur while loading or saving console configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The configuration describes a console that cannot be built
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }
}

/// One channel strip in the console layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Mono or stereo; decides the strip's EQ section and pan law.
    pub layout: ChannelLayout,
}

/// Meter geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeterConfig {
    /// Number of lamps in the meter ladder.
    #[serde(default = "default_segments")]
    pub segments: usize,

    /// Average bin amplitude (0-255 scale) that lights the full ladder.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
}

fn default_segments() -> usize {
    6
}

fn default_sensitivity() -> f32 {
    80.0
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            sensitivity: default_sensitivity(),
        }
    }
}

/// Complete console description.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000
///
/// [[channels]]
/// layout = "mono"
///
/// [[channels]]
/// layout = "stereo"
///
/// [meter]
/// segments = 6
/// sensitivity = 80.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// Sample rate the console runs at (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channel strips in slot order. Slot numbers start at 1.
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,

    /// Meter geometry.
    #[serde(default)]
    pub meter: MeterConfig,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: vec![
                ChannelConfig {
                    layout: ChannelLayout::Mono,
                },
                ChannelConfig {
                    layout: ChannelLayout::Stereo,
                },
            ],
            meter: MeterConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load a console description from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a console description from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ConsoleConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the console description to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check that the description can be built into a console.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::Invalid("no channels defined".to_string()));
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample rate must be nonzero".to_string()));
        }
        if self.meter.segments == 0 {
            return Err(ConfigError::Invalid(
                "meter must have at least one segment".to_string(),
            ));
        }
        if self.meter.sensitivity.is_nan() || self.meter.sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(
                "meter sensitivity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_mono_then_stereo() {
        let config = ConsoleConfig::default();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.channels[0].layout, ChannelLayout::Mono);
        assert_eq!(config.channels[1].layout, ChannelLayout::Stereo);
        assert_eq!(config.meter.segments, 6);
    }

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [[channels]]
            layout = "mono"
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.meter.segments, 6);
        assert_eq!(config.meter.sensitivity, 80.0);
    }

    #[test]
    fn rejects_empty_channel_list() {
        let err = ConsoleConfig::from_toml("sample_rate = 44100").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let mut config = ConsoleConfig::default();
        config.sample_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_meter() {
        let mut config = ConsoleConfig::default();
        config.meter.segments = 0;
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.meter.sensitivity = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_layout() {
        let err = ConsoleConfig::from_toml(
            r#"
            [[channels]]
            layout = "quad"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.toml");

        let config = ConsoleConfig::default();
        config.save(&path).unwrap();
        let loaded = ConsoleConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = ConsoleConfig::load("/nonexistent/console.toml").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/nonexistent/console.toml"), "got: {msg}");
    }
}
