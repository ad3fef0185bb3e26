use strum::{FromRepr, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum GameMode {
    #[strum(serialize = "osu!")]
    Osu = 0,
    #[strum(serialize = "osu!taiko")]
    Taiko = 1,
    #[strum(serialize = "osu!catch")]
    Catch = 2,
    #[strum(serialize = "osu!mania")]
    Mania = 3,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Osu)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read the game mode from the first `Mode:` line of a beatmap.
///
/// Returns `None` when there is no such line or its value is not a known mode.
pub fn read_game_mode(content: &str) -> Option<GameMode> {
    let line = content.lines().find(|line| line.starts_with("Mode:"))?;
    let value = line.split(':').nth(1)?.trim();
    value.parse::<u8>().ok().and_then(GameMode::from_u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_from_u8() {
        assert_eq!(GameMode::from_u8(0), Some(GameMode::Osu));
        assert_eq!(GameMode::from_u8(3), Some(GameMode::Mania));
        assert_eq!(GameMode::from_u8(4), None);
    }

    #[test]
    fn test_read_standard_mode() {
        let content = "osu file format v14\n\n[General]\nAudioFilename: audio.mp3\nMode: 0\n";
        let mode = read_game_mode(content);
        assert_eq!(mode, Some(GameMode::Osu));
        assert!(mode.unwrap().is_standard());
    }

    #[test]
    fn test_read_other_modes() {
        assert_eq!(read_game_mode("Mode: 1"), Some(GameMode::Taiko));
        assert_eq!(read_game_mode("Mode:3\r\n"), Some(GameMode::Mania));
        assert!(!GameMode::Catch.is_standard());
    }

    #[test]
    fn test_first_mode_line_wins() {
        assert_eq!(read_game_mode("Mode: 3\nMode: 0\n"), Some(GameMode::Mania));
    }

    #[test]
    fn test_missing_or_invalid_mode() {
        assert_eq!(read_game_mode("[General]\nAudioFilename: a.mp3\n"), None);
        assert_eq!(read_game_mode("Mode: standard\n"), None);
        assert_eq!(read_game_mode("Mode:\n"), None);
        // Indented lines are not headers
        assert_eq!(read_game_mode("  Mode: 0\n"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(GameMode::Osu.to_string(), "osu!");
        assert_eq!(GameMode::Taiko.name(), "osu!taiko");
    }
}
