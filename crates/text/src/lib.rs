//! # GENSYS Text
//!
//! Lexical helpers used to decide which uploaded documents feed which part
//! of a generated report.
//!
//! ```text
//! Section title ──┐
//!                 ├──> normalize ──> is_match ──> SectionRouter ──> RoutedSection[]
//! Folder name ────┘
//! ```
//!
//! Matching is a best-effort heuristic: a false positive pulls unrelated
//! content into a section, a false negative leaves the section with a
//! placeholder.
//!
//! ## Example
//!
//! ```rust
//! use gensys_text::{is_match, normalize};
//!
//! let section = normalize("Santé & Bien-être");
//! let folder = normalize("SANTE");
//! assert!(is_match(&section, &folder));
//! ```

mod matcher;
mod routing;

pub use matcher::{is_match, matches_label, normalize, SIGNIFICANT_WORD_MIN_CHARS};
pub use routing::{FolderContent, FolderFile, RoutedSection, SectionRouter, DEFAULT_PLACEHOLDER};
