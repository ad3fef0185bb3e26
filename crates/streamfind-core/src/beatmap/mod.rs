//! Beatmap parsing.
//!
//! This module turns the text of an `.osu` file into the data the stream
//! detector needs:
//! - `TempoChange`, `NoteEvent` - uninherited timing points and note start times
//! - `ParsedBeatmap` - both sequences for a single file
//! - `GameMode` - the `Mode:` value used to filter standard-mode maps

mod mode;
mod parser;
mod types;

pub use mode::*;
pub use parser::*;
pub use types::*;
