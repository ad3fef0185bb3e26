//! Output listing of beatmaps that contain streams.
//!
//! Each beatmap with at least one stream gets a block:
//!
//! ```text
//! Artist - Title (Mapper) [Insane].osu
//! 21x at 180BPM
//! 13x at 200BPM
//!
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::detect::Stream;
use crate::error::{Error, Result};

/// Format one stream as `<length>x at <bpm>BPM`, both rounded half away from zero.
pub fn format_stream(stream: &Stream) -> String {
    format!(
        "{}x at {}BPM",
        stream.length,
        stream.bpm.round() as i64
    )
}

pub struct ReportWriter<W: Write> {
    sink: W,
}

impl ReportWriter<BufWriter<File>> {
    /// Create (or truncate) the listing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::OutputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Append a beatmap's streams. Writes nothing when `streams` is empty.
    pub fn write_beatmap(&mut self, name: &str, streams: &[Stream]) -> Result<()> {
        if streams.is_empty() {
            return Ok(());
        }

        writeln!(self.sink, "{}", name)?;
        for stream in streams {
            writeln!(self.sink, "{}", format_stream(stream))?;
        }
        writeln!(self.sink)?;
        Ok(())
    }

    /// Flush buffered output and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
