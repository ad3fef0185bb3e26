//! Stream detection.
//!
//! A stream is a run of consecutive notes spaced no further apart than a
//! 16th note (a quarter of the governing beat length) plus a small
//! tolerance. Runs at least `stream_threshold` notes long are reported
//! together with the BPM they were played at.

use serde::Serialize;

use crate::beatmap::{NoteEvent, ParsedBeatmap, TempoChange};
use crate::config::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stream {
    pub length: u32,
    pub bpm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    /// Minimum number of consecutive notes reported as a stream.
    pub stream_threshold: u32,
    /// Slack added to the 16th-note gap.
    pub variance_tolerance_ms: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            stream_threshold: defaults::STREAM_THRESHOLD,
            variance_tolerance_ms: defaults::VARIANCE_TOLERANCE_MS,
        }
    }
}

/// Tempo in effect for the note currently being examined.
#[derive(Debug, Clone, Copy)]
struct Tempo {
    index: usize,
    current_beat_ms: f64,
    previous_beat_ms: f64,
    /// Set only on the note where `index` moved.
    just_changed: bool,
}

impl Tempo {
    fn starting_at(tempo_changes: &[TempoChange], first_note: f64) -> Self {
        let index = governing_index(tempo_changes, 0, first_note);
        let beat = tempo_changes[index].ms_per_beat;
        Self {
            index,
            current_beat_ms: beat,
            previous_beat_ms: beat,
            just_changed: false,
        }
    }

    fn advance_to(&mut self, tempo_changes: &[TempoChange], note_time: f64) {
        let index = governing_index(tempo_changes, self.index, note_time);
        self.just_changed = index != self.index;
        if self.just_changed {
            self.previous_beat_ms = self.current_beat_ms;
            self.current_beat_ms = tempo_changes[index].ms_per_beat;
            self.index = index;
        }
    }

    /// Largest gap (excluding tolerance) that keeps a run going.
    fn gap_threshold_ms(&self) -> f64 {
        self.current_beat_ms / 4.0
    }

    /// Beat length a run ending on this note was played at.
    ///
    /// A tempo change takes effect on the note that carries it, so a run
    /// closing on that note still belongs to the previous tempo.
    fn run_beat_ms(&self) -> f64 {
        if self.just_changed {
            self.previous_beat_ms
        } else {
            self.current_beat_ms
        }
    }
}

/// Index of the last tempo change at or before `time`, searching forward from `from`.
fn governing_index(tempo_changes: &[TempoChange], from: usize, time: f64) -> usize {
    let mut index = from;
    while index + 1 < tempo_changes.len() && tempo_changes[index + 1].offset_ms <= time {
        index += 1;
    }
    index
}

#[derive(Debug, Clone)]
pub struct StreamDetector {
    settings: DetectorSettings,
}

impl StreamDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self { settings }
    }

    /// Whether the beatmap has a timing point and at least `stream_threshold` notes.
    ///
    /// Beatmaps failing this have no streams.
    pub fn has_enough_data(&self, beatmap: &ParsedBeatmap) -> bool {
        !beatmap.tempo_changes.is_empty()
            && beatmap.notes.len() >= self.settings.stream_threshold as usize
    }

    /// Find every stream in the beatmap, in time order.
    pub fn detect(&self, beatmap: &ParsedBeatmap) -> Vec<Stream> {
        if !self.has_enough_data(beatmap) {
            return Vec::new();
        }
        self.detect_in(&beatmap.tempo_changes, &beatmap.notes)
    }

    fn detect_in(&self, tempo_changes: &[TempoChange], notes: &[NoteEvent]) -> Vec<Stream> {
        let Some((first, rest)) = notes.split_first() else {
            return Vec::new();
        };

        let mut tempo = Tempo::starting_at(tempo_changes, first.time_ms);
        let mut streams = Vec::new();
        let mut run_length: u32 = 1;
        let mut last_note_time = first.time_ms;

        for (i, note) in rest.iter().enumerate() {
            let is_last = i + 1 == rest.len();
            tempo.advance_to(tempo_changes, note.time_ms);

            let gap = note.time_ms - last_note_time;
            let continues = gap <= tempo.gap_threshold_ms() + self.settings.variance_tolerance_ms;
            if continues {
                run_length += 1;
            } else {
                self.close_run(&mut streams, run_length, tempo.run_beat_ms());
                run_length = 1;
            }

            // A run still open on the final note would otherwise never close.
            if is_last {
                let beat_ms = if continues {
                    tempo.run_beat_ms()
                } else {
                    tempo.current_beat_ms
                };
                self.close_run(&mut streams, run_length, beat_ms);
            }

            last_note_time = note.time_ms;
        }

        streams
    }

    fn close_run(&self, streams: &mut Vec<Stream>, run_length: u32, beat_ms: f64) {
        if run_length >= self.settings.stream_threshold {
            streams.push(Stream {
                length: run_length,
                bpm: 60_000.0 / beat_ms,
            });
        }
    }
}

impl Default for StreamDetector {
    fn default() -> Self {
        Self::new(DetectorSettings::default())
    }
}
