/// Uninherited timing point: a new beat length starting at `offset_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoChange {
    pub offset_ms: f64,
    pub ms_per_beat: f64,
}

impl TempoChange {
    pub fn new(offset_ms: f64, ms_per_beat: f64) -> Self {
        Self {
            offset_ms,
            ms_per_beat,
        }
    }

    pub fn bpm(&self) -> f64 {
        60_000.0 / self.ms_per_beat
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub time_ms: f64,
}

impl NoteEvent {
    pub fn new(time_ms: f64) -> Self {
        Self { time_ms }
    }
}

/// Timing and note data read from one beatmap.
///
/// Both sequences keep file order. Nothing here is sorted; the detector
/// assumes the file already lists them by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBeatmap {
    pub tempo_changes: Vec<TempoChange>,
    pub notes: Vec<NoteEvent>,
    /// True once a `[HitObjects]` marker was seen, even if no note followed it.
    pub has_note_section: bool,
}

impl ParsedBeatmap {
    /// Build directly from tempo pairs `(offset, ms_per_beat)` and note times.
    pub fn from_parts(tempo_changes: &[(f64, f64)], note_times: &[f64]) -> Self {
        Self {
            tempo_changes: tempo_changes
                .iter()
                .map(|&(offset, beat)| TempoChange::new(offset, beat))
                .collect(),
            notes: note_times.iter().copied().map(NoteEvent::new).collect(),
            has_note_section: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.has_note_section
    }
}
