pub mod beatmap;
pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod finder;
pub mod report;
pub mod scan;

pub use beatmap::{
    GameMode, NoteEvent, ParsedBeatmap, TempoChange, parse_beatmap, read_beatmap_text,
    read_game_mode,
};
pub use config::Config;
pub use detect::{DetectorSettings, Stream, StreamDetector};
pub use diagnostics::{Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use error::{Error, Result};
pub use finder::{BeatmapOutcome, BeatmapStreams, RunSummary, StreamFinder};
pub use report::{ReportWriter, format_stream};
pub use scan::discover_beatmaps;
