use crate::error::{LexiconError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capitalized words that describe the subject generically and are never
/// treated as proper nouns.
pub const DEFAULT_GENERIC_NOUNS: &[&str] =
    &["jeune", "enfant", "adolescent", "personne", "il", "elle"];

/// Proper nouns that may legitimately appear in a note about anyone.
pub const DEFAULT_EXCLUDED_WORDS: &[&str] = &["France", "Paris", "Monsieur", "Madame"];

/// Word lists used by the name check.
///
/// Both lists compare case-insensitively. A TOML document may override
/// either list; a missing key keeps its default.
///
/// ```toml
/// generic_nouns = ["jeune", "enfant", "mineur"]
/// excluded_words = ["France", "Paris", "Lyon"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Lexicon {
    pub generic_nouns: Vec<String>,
    pub excluded_words: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            generic_nouns: DEFAULT_GENERIC_NOUNS.iter().map(|w| w.to_string()).collect(),
            excluded_words: DEFAULT_EXCLUDED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Lexicon {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let lexicon: Self = toml::from_str(raw)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_toml_str(&raw)?;
        debug!(
            "Loaded lexicon from {} ({} generic nouns, {} excluded words)",
            path.display(),
            lexicon.generic_nouns.len(),
            lexicon.excluded_words.len()
        );
        Ok(lexicon)
    }

    pub fn validate(&self) -> Result<()> {
        if self.generic_nouns.iter().any(|w| w.trim().is_empty()) {
            return Err(LexiconError::EmptyEntry("generic_nouns"));
        }
        if self.excluded_words.iter().any(|w| w.trim().is_empty()) {
            return Err(LexiconError::EmptyEntry("excluded_words"));
        }
        Ok(())
    }

    pub fn is_generic_noun(&self, word: &str) -> bool {
        contains_ignore_case(&self.generic_nouns, word)
    }

    pub fn is_excluded(&self, word: &str) -> bool {
        contains_ignore_case(&self.excluded_words, word)
    }
}

fn contains_ignore_case(list: &[String], word: &str) -> bool {
    let lowered = word.to_lowercase();
    list.iter().any(|entry| entry.to_lowercase() == lowered)
}
