//! Integration tests for streamfind-core
//!
//! These tests run the whole pipeline over a songs directory built in a
//! temporary folder: discovery, mode filtering, parsing, detection and the
//! output listing.

use std::fs;
use std::path::Path;

use streamfind_core::{BeatmapStreams, Config, Error, Stream, StreamFinder};
use tempfile::TempDir;

fn beatmap(mode: u8, timing_points: &[&str], note_times: &[f64]) -> String {
    let mut text = format!(
        "osu file format v14\r\n\r\n[General]\r\nAudioFilename: audio.mp3\r\nMode: {}\r\n\r\n[TimingPoints]\r\n",
        mode
    );
    for line in timing_points {
        text.push_str(line);
        text.push_str("\r\n");
    }
    text.push_str("\r\n[HitObjects]\r\n");
    for time in note_times {
        text.push_str(&format!("256,192,{},1,0,0:0:0:0:\r\n", time));
    }
    text
}

fn evenly_spaced(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

fn write_map(root: &Path, set: &str, file: &str, content: &[u8]) {
    let dir = root.join(set);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

fn config_for(songs: &Path, output: &Path) -> Config {
    Config {
        source_directory: songs.to_path_buf(),
        output_path: output.to_path_buf(),
        ..Config::default()
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_full_run_writes_listing() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("Songs");
        let output = temp_dir.path().join("streamyMaps.txt");

        // 300 BPM stream of 13, then a 150 BPM stream of 16 after a tempo change
        let mut notes = evenly_spaced(0.0, 50.0, 13);
        notes.extend(evenly_spaced(3000.0, 100.0, 16));
        let streamy = beatmap(
            0,
            &["0,200,4,2,0,60,1,0", "1000,-100,4,2,0,60,0,1", "3000,400,4,2,0,60,1,0"],
            &notes,
        );
        write_map(&songs, "1 Artist - Fast", "Artist - Fast (Mapper) [Insane].osu", streamy.as_bytes());

        let calm = beatmap(0, &["0,500,4,2,0,60,1,0"], &evenly_spaced(0.0, 500.0, 20));
        write_map(&songs, "1 Artist - Fast", "Artist - Fast (Mapper) [Easy].osu", calm.as_bytes());

        let mania = beatmap(3, &["0,200,4,2,0,60,1,0"], &evenly_spaced(0.0, 50.0, 30));
        write_map(&songs, "2 Other - Keys", "Other - Keys [7K].osu", mania.as_bytes());

        let broken = "osu file format v14\nMode: 0\n[TimingPoints]\n0,200,4,2,0,60,1,0\n";
        write_map(&songs, "3 Broken", "Broken [Hard].osu", broken.as_bytes());

        write_map(&songs, "4 Binary", "Garbage [Hard].osu", &[0xFF, 0xFE, 0x00, 0x4D]);
        write_map(&songs, "4 Binary", "notes.txt", b"Mode: 0\n[HitObjects]\n");

        let finder = StreamFinder::new(config_for(&songs, &output));
        let summary = finder.run().unwrap();

        assert_eq!(summary.files_found, 5);
        assert_eq!(summary.read_failures, 1);
        assert_eq!(summary.skipped_mode, 1);
        assert_eq!(summary.parse_failures, 1);
        assert_eq!(summary.beatmaps_analyzed, 2);
        assert_eq!(summary.beatmaps_with_streams, 1);
        assert_eq!(summary.streams_found, 2);
        assert_eq!(
            summary.streamy_beatmaps,
            vec![BeatmapStreams {
                name: "Artist - Fast (Mapper) [Insane].osu".to_string(),
                streams: vec![
                    Stream {
                        length: 13,
                        bpm: 300.0
                    },
                    Stream {
                        length: 16,
                        bpm: 150.0
                    },
                ],
            }]
        );

        let listing = fs::read_to_string(&output).unwrap();
        assert_eq!(
            listing,
            "Artist - Fast (Mapper) [Insane].osu\n13x at 300BPM\n16x at 150BPM\n\n"
        );
    }

    #[test]
    fn test_listing_follows_folder_order() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("Songs");
        let output = temp_dir.path().join("out.txt");

        let notes = evenly_spaced(0.0, 50.0, 13);
        let map = beatmap(0, &["0,200,4,2,0,60,1,0"], &notes);
        write_map(&songs, "20 B", "b.osu", map.as_bytes());
        write_map(&songs, "10 A", "a.osu", map.as_bytes());

        StreamFinder::new(config_for(&songs, &output)).run().unwrap();

        let listing = fs::read_to_string(&output).unwrap();
        assert_eq!(listing, "a.osu\n13x at 300BPM\n\nb.osu\n13x at 300BPM\n\n");
    }

    #[test]
    fn test_bom_prefixed_beatmap() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("Songs");
        let output = temp_dir.path().join("out.txt");

        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend(beatmap(0, &["0,200,4,2,0,60,1,0"], &evenly_spaced(0.0, 50.0, 13)).bytes());
        write_map(&songs, "1 Set", "bom.osu", &bytes);

        let summary = StreamFinder::new(config_for(&songs, &output)).run().unwrap();
        assert_eq!(summary.streams_found, 1);
    }

    #[test]
    fn test_output_truncated_when_nothing_found() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("Songs");
        fs::create_dir_all(&songs).unwrap();
        let output = temp_dir.path().join("out.txt");
        fs::write(&output, "previous run\n").unwrap();

        let summary = StreamFinder::new(config_for(&songs, &output)).run().unwrap();

        assert_eq!(summary.files_found, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }
}

mod fatal_errors {
    use super::*;

    #[test]
    fn test_unwritable_output_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("Songs");
        fs::create_dir_all(&songs).unwrap();
        let output = temp_dir.path().join("missing").join("out.txt");

        let err = StreamFinder::new(config_for(&songs, &output)).run().unwrap_err();
        assert!(matches!(err, Error::OutputOpen { .. }));
    }

    #[test]
    fn test_missing_songs_directory_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("NoSongs");
        let output = temp_dir.path().join("out.txt");

        let err = StreamFinder::new(config_for(&songs, &output)).run().unwrap_err();
        assert!(matches!(err, Error::SourceDirectory { .. }));
    }

    #[test]
    fn test_invalid_config_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            stream_threshold: 0,
            ..config_for(temp_dir.path(), &temp_dir.path().join("out.txt"))
        };

        let err = StreamFinder::new(config).run().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
