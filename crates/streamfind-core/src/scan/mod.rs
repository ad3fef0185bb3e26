//! Beatmap discovery.
//!
//! The songs directory holds one folder per beatmap set; each folder holds
//! the `.osu` difficulty files plus audio and artwork. Only the immediate
//! subdirectories are searched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension of a beatmap difficulty file.
pub const BEATMAP_EXTENSION: &str = ".osu";

pub fn is_beatmap_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(BEATMAP_EXTENSION))
}

/// List every `.osu` file one level below `root`, sorted by set folder then file name.
///
/// An unreadable `root` is an error. Unreadable set folders are skipped with a warning.
pub fn discover_beatmaps<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let entries = fs::read_dir(root).map_err(|source| Error::SourceDirectory {
        path: root.to_path_buf(),
        source,
    })?;

    let mut set_dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    set_dirs.sort();

    let mut beatmaps = Vec::new();
    for dir in &set_dirs {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("cannot read directory {}: {e}", dir.display());
                continue;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_beatmap_file(path))
            .collect();
        files.sort();
        beatmaps.extend(files);
    }

    tracing::debug!(
        "Found {} beatmap files in {} set folders",
        beatmaps.len(),
        set_dirs.len()
    );
    Ok(beatmaps)
}
