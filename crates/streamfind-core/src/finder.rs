use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::beatmap::{parse_beatmap, read_beatmap_text, read_game_mode};
use crate::config::Config;
use crate::detect::{Stream, StreamDetector};
use crate::diagnostics::{Diagnostics, format_tempo_changes, for_verbosity};
use crate::error::Result;
use crate::report::ReportWriter;
use crate::scan::discover_beatmaps;

/// Streams found in one beatmap, as listed in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatmapStreams {
    pub name: String,
    pub streams: Vec<Stream>,
}

/// Counters for one run over the songs directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub files_found: usize,
    pub read_failures: usize,
    pub skipped_mode: usize,
    pub parse_failures: usize,
    pub beatmaps_analyzed: usize,
    pub beatmaps_with_streams: usize,
    pub streams_found: usize,
    /// Beatmaps with at least one stream, in listing order.
    pub streamy_beatmaps: Vec<BeatmapStreams>,
}

/// What happened to a single beatmap.
#[derive(Debug, Clone, PartialEq)]
pub enum BeatmapOutcome {
    /// `Mode:` missing or not osu!standard.
    NotStandard,
    /// No `[HitObjects]` section, detection did not run.
    Unparsable,
    Analyzed(Vec<Stream>),
}

pub struct StreamFinder {
    config: Config,
    detector: StreamDetector,
    diagnostics: Box<dyn Diagnostics>,
}

impl StreamFinder {
    /// Create a finder whose diagnostics follow `config.verbose_diagnostics`.
    pub fn new(config: Config) -> Self {
        let diagnostics = for_verbosity(config.verbose_diagnostics);
        Self::with_diagnostics(config, diagnostics)
    }

    pub fn with_diagnostics(config: Config, diagnostics: Box<dyn Diagnostics>) -> Self {
        let detector = StreamDetector::new(config.detector_settings());
        Self {
            config,
            detector,
            diagnostics,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the source directory and write the listing to `output_path`.
    ///
    /// Only failing to open the listing or to read the source directory
    /// aborts the run; bad beatmaps are counted and skipped.
    pub fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;
        info!("Finding streams in {}", self.config.source_directory.display());

        let mut writer = ReportWriter::create(&self.config.output_path)?;
        let summary = self.run_into(&self.config.source_directory, &mut writer)?;
        writer.finish()?;

        info!(
            "Found {} streams in {} of {} beatmaps, listing written to {}",
            summary.streams_found,
            summary.beatmaps_with_streams,
            summary.beatmaps_analyzed,
            self.config.output_path.display()
        );
        Ok(summary)
    }

    /// Process every beatmap under `root`, appending results to `writer`.
    pub fn run_into<W: Write>(
        &self,
        root: &Path,
        writer: &mut ReportWriter<W>,
    ) -> Result<RunSummary> {
        let paths = discover_beatmaps(root)?;
        let mut summary = RunSummary {
            files_found: paths.len(),
            ..RunSummary::default()
        };

        for path in &paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let content = match read_beatmap_text(path) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    summary.read_failures += 1;
                    continue;
                }
            };

            match self.process_text(&name, &content, writer)? {
                BeatmapOutcome::NotStandard => summary.skipped_mode += 1,
                BeatmapOutcome::Unparsable => summary.parse_failures += 1,
                BeatmapOutcome::Analyzed(streams) => {
                    summary.beatmaps_analyzed += 1;
                    if !streams.is_empty() {
                        summary.beatmaps_with_streams += 1;
                        summary.streams_found += streams.len();
                        summary.streamy_beatmaps.push(BeatmapStreams { name, streams });
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Filter, parse and analyze one beatmap's text.
    ///
    /// Errors only if writing to the listing fails.
    pub fn process_text<W: Write>(
        &self,
        name: &str,
        content: &str,
        writer: &mut ReportWriter<W>,
    ) -> Result<BeatmapOutcome> {
        match read_game_mode(content) {
            Some(mode) if mode.is_standard() => {}
            Some(mode) => {
                debug!("Skipping {} ({} map)", name, mode);
                return Ok(BeatmapOutcome::NotStandard);
            }
            None => {
                debug!("Skipping {} (no usable Mode line)", name);
                return Ok(BeatmapOutcome::NotStandard);
            }
        }

        let beatmap = match parse_beatmap(content) {
            Ok(b) => b,
            Err(e) => {
                debug!("Skipping {}: {}", name, e);
                return Ok(BeatmapOutcome::Unparsable);
            }
        };

        let tracing_enabled = self.diagnostics.is_enabled();
        if tracing_enabled {
            self.diagnostics.trace(&format!("Finding streams for {}", name));
            self.diagnostics
                .trace(&format_tempo_changes(&beatmap.tempo_changes));
            if !self.detector.has_enough_data(&beatmap) {
                self.diagnostics.trace(&format!(
                    "Not enough data for stream detection ({} timing points, {} notes)",
                    beatmap.tempo_changes.len(),
                    beatmap.notes.len()
                ));
            }
        }

        let streams = self.detector.detect(&beatmap);
        if tracing_enabled {
            for stream in &streams {
                self.diagnostics.trace(&format!(
                    "Added new stream: {}x at {}BPM",
                    stream.length, stream.bpm
                ));
            }
        }

        writer.write_beatmap(name, &streams)?;
        Ok(BeatmapOutcome::Analyzed(streams))
    }
}
