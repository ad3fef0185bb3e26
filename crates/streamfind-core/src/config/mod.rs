//! Run configuration.
//!
//! This module contains the settings for a single scan:
//! - `Config` - source directory, output listing, detection thresholds
//! - Default values for every recognized option
//!
//! A config file is optional; every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::detect::DetectorSettings;
use crate::error::{Error, Result};

/// Default values for every configuration option.
pub mod defaults {
    /// osu! songs directory on a stock Windows install.
    pub const SOURCE_DIRECTORY: &str = r"C:\Program Files (x86)\osu!\Songs";

    /// Listing file, relative to the working directory.
    pub const OUTPUT_PATH: &str = "streamyMaps.txt";

    /// Minimum number of consecutive notes counted as a stream.
    pub const STREAM_THRESHOLD: u32 = 13;

    /// Slack (in ms) added to the 16th-note gap to absorb rounding in note offsets.
    pub const VARIANCE_TOLERANCE_MS: f64 = 3.0;

    /// File name looked up in the working directory when no config path is given.
    pub const CONFIG_FILE: &str = "streamfind.toml";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_directory: PathBuf,
    pub output_path: PathBuf,
    pub stream_threshold: u32,
    pub variance_tolerance_ms: f64,
    pub verbose_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from(defaults::SOURCE_DIRECTORY),
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            stream_threshold: defaults::STREAM_THRESHOLD,
            variance_tolerance_ms: defaults::VARIANCE_TOLERANCE_MS,
            verbose_diagnostics: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stream_threshold == 0 {
            return Err(Error::InvalidConfig(
                "stream_threshold must be at least 1".to_string(),
            ));
        }
        if !self.variance_tolerance_ms.is_finite() || self.variance_tolerance_ms < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "variance_tolerance_ms must be a non-negative number, got {}",
                self.variance_tolerance_ms
            )));
        }
        Ok(())
    }

    pub fn detector_settings(&self) -> DetectorSettings {
        DetectorSettings {
            stream_threshold: self.stream_threshold,
            variance_tolerance_ms: self.variance_tolerance_ms,
        }
    }
}
