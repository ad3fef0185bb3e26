//! CLI argument definitions for streamfind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use streamfind_core::Config;
use streamfind_core::config::defaults;

#[derive(Parser)]
#[command(name = "streamfind")]
#[command(about = "Find streams in osu! beatmaps", version)]
pub struct Args {
    /// Path to config file (default: streamfind.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// osu! songs directory to scan
    #[arg(short, long, value_name = "DIR", env = "STREAMFIND_SOURCE")]
    pub source: Option<PathBuf>,

    /// Output listing path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum consecutive notes counted as a stream
    #[arg(long, value_name = "NOTES")]
    pub threshold: Option<u32>,

    /// Timing leniency in ms added to the 16th-note gap
    #[arg(long, value_name = "MS")]
    pub tolerance: Option<f64>,

    /// Print per-beatmap trace output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(source) = &self.source {
            config.source_directory = source.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(threshold) = self.threshold {
            config.stream_threshold = threshold;
        }
        if let Some(tolerance) = self.tolerance {
            config.variance_tolerance_ms = tolerance;
        }
        if self.verbose {
            config.verbose_diagnostics = true;
        }
        config
    }
}

/// Where the effective config came from. Logged once the subscriber is up.
#[derive(Debug)]
pub enum ConfigOrigin {
    Defaults,
    File(PathBuf),
    /// `streamfind.toml` exists but could not be used.
    Fallback { path: PathBuf, error: String },
}

/// Load the explicit config file, else `streamfind.toml` if it exists, else defaults.
///
/// Only a broken explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<(Config, ConfigOrigin)> {
    if let Some(path) = path {
        let config = Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        return Ok((config, ConfigOrigin::File(path.to_path_buf())));
    }

    let default_path = Path::new(defaults::CONFIG_FILE);
    if !default_path.exists() {
        return Ok((Config::default(), ConfigOrigin::Defaults));
    }

    match Config::load(default_path) {
        Ok(c) => Ok((c, ConfigOrigin::File(default_path.to_path_buf()))),
        Err(e) => Ok((
            Config::default(),
            ConfigOrigin::Fallback {
                path: default_path.to_path_buf(),
                error: e.to_string(),
            },
        )),
    }
}

/// Filter used when `RUST_LOG` is unset: info, or debug for verbose diagnostics.
pub fn default_log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("streamfind={level},streamfind_core={level}")
}
