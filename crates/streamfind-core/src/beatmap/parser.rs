use std::fs;
use std::path::Path;

use encoding_rs::UTF_8;

use super::types::{NoteEvent, ParsedBeatmap, TempoChange};
use crate::error::{Error, Result};

/// Section header that starts the timing point list.
pub const TIMING_POINTS_MARKER: &str = "[TimingPoints]";

/// Section header that starts the hit object list.
pub const HIT_OBJECTS_MARKER: &str = "[HitObjects]";

/// Field count of a timing point record.
const TIMING_POINT_FIELDS: usize = 8;

/// Minimum field count of a hit object record.
const HIT_OBJECT_MIN_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    TimingPoints,
    HitObjects,
}

/// Read a beatmap file and decode it as UTF-8, dropping a leading BOM.
pub fn read_beatmap_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path)?;
    decode_beatmap_text(&bytes)
}

pub fn decode_beatmap_text(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| Error::Encoding("file is not valid UTF-8".to_string()))
}

/// Parse timing points and hit objects from beatmap text.
///
/// Records that do not fit their section (wrong field count, non-numeric
/// values) are skipped. Fails only when no `[HitObjects]` marker exists.
pub fn parse_beatmap(content: &str) -> Result<ParsedBeatmap> {
    let mut beatmap = ParsedBeatmap::default();
    let mut section = Section::None;

    for line in content.lines() {
        if line == TIMING_POINTS_MARKER {
            section = Section::TimingPoints;
            tracing::trace!("Parsing timing points");
            continue;
        }
        if line == HIT_OBJECTS_MARKER {
            section = Section::HitObjects;
            beatmap.has_note_section = true;
            tracing::trace!("Parsing hit objects");
            continue;
        }

        match section {
            Section::None => {}
            Section::TimingPoints => {
                if let Some(tempo) = parse_timing_point(line) {
                    beatmap.tempo_changes.push(tempo);
                }
            }
            Section::HitObjects => {
                if let Some(note) = parse_hit_object(line) {
                    beatmap.notes.push(note);
                }
            }
        }
    }

    if !beatmap.is_valid() {
        return Err(Error::MissingNoteSection);
    }

    Ok(beatmap)
}

/// Parse `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`.
///
/// Inherited points (negative beat length) are not tempo changes and yield `None`.
fn parse_timing_point(line: &str) -> Option<TempoChange> {
    let fields = split_record(line);
    if fields.len() != TIMING_POINT_FIELDS {
        return None;
    }

    let offset_ms = parse_number(fields[0])?;
    let ms_per_beat = parse_number(fields[1])?;
    (ms_per_beat >= 0.0).then(|| TempoChange::new(offset_ms, ms_per_beat))
}

/// Parse `x,y,time,type,hitSound,objectParams[,hitSample]`.
fn parse_hit_object(line: &str) -> Option<NoteEvent> {
    let fields = split_record(line);
    if fields.len() < HIT_OBJECT_MIN_FIELDS {
        return None;
    }

    let time_ms = parse_number(fields[2])?;
    (time_ms >= 0.0).then(|| NoteEvent::new(time_ms))
}

/// Split a comma-separated record, dropping trailing empty fields.
///
/// A record like `a,b,,` has two fields, so a dangling comma never pads a
/// short line up to a valid field count.
fn split_record(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}
