use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open output listing {path:?}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source directory {path:?}: {source}")]
    SourceDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No [HitObjects] section found")]
    MissingNoteSection,

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.message().to_string())
    }
}
