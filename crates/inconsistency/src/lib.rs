//! # GENSYS Inconsistency
//!
//! Scans a transcribed or written note against the profile of the young
//! person it concerns and reports possible factual contradictions.
//!
//! Findings are advisory: the caller decides whether to display or store
//! them, nothing here blocks a save. Detection is a pure function of the
//! text, the profile and the [`Lexicon`] in use.
//!
//! Checks run in a fixed order:
//!
//! 1. unexpected proper nouns (one warning per occurrence, textual order)
//! 2. arrival years mentioned before the birth date (textual order)
//! 3. profile arrival date before birth date (at most one error)
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gensys_inconsistency::{detect, FindingType, ProfileRecord, Severity};
//!
//! let profile = ProfileRecord {
//!     first_name: "Marie".into(),
//!     last_name: "Dupont".into(),
//!     birth_date: NaiveDate::from_ymd_opt(2018, 1, 1),
//!     arrival_date: None,
//! };
//! let findings = detect("Marie est arrivée en 2015", Some(&profile));
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].finding_type, FindingType::Date);
//! assert_eq!(findings[0].severity, Severity::Error);
//! ```

mod detector;
mod error;
mod lexicon;
mod types;

pub use detector::{detect, InconsistencyDetector, ARRIVAL_MARKER, DATE_FORMAT};
pub use error::{LexiconError, Result};
pub use lexicon::{Lexicon, DEFAULT_EXCLUDED_WORDS, DEFAULT_GENERIC_NOUNS};
pub use types::{has_errors, FindingType, InconsistencyFinding, ProfileRecord, Severity};
