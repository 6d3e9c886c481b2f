use std::path::PathBuf;
use thiserror::Error;

/// Result type for lexicon loading
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors raised while loading a custom [`crate::Lexicon`]
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon file could not be read
    #[error("Failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lexicon document is not valid TOML or has unknown keys
    #[error("Invalid lexicon: {0}")]
    Parse(#[from] toml::de::Error),

    /// A list entry is empty or blank
    #[error("Invalid lexicon: empty entry in '{0}'")]
    EmptyEntry(&'static str),
}
