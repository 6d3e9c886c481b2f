use unicode_normalization::UnicodeNormalization;

/// Words shorter than this never take part in word-overlap matching.
pub const SIGNIFICANT_WORD_MIN_CHARS: usize = 3;

/// Canonicalize a label for comparison.
///
/// Lowercases, strips diacritics, drops everything that is not an ASCII
/// letter or whitespace, then collapses whitespace runs and trims.
/// The result only contains `a-z` and single spaces, so the function is
/// idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let letters: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();

    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decide whether two already-normalized labels name the same category.
///
/// Matches on equality, on one label containing the other, or when a
/// significant word of one label contains (or is contained in) a
/// significant word of the other. Symmetric in its arguments.
#[must_use]
pub fn is_match(section_title: &str, folder_name: &str) -> bool {
    if section_title == folder_name {
        return true;
    }

    // An empty label is a substring of everything, so it matches any label.
    if section_title.contains(folder_name) || folder_name.contains(section_title) {
        return true;
    }

    let folder_words: Vec<&str> = significant_words(folder_name).collect();
    if folder_words.is_empty() {
        return false;
    }

    significant_words(section_title).any(|section_word| {
        folder_words
            .iter()
            .any(|folder_word| folder_word.contains(section_word) || section_word.contains(folder_word))
    })
}

/// Normalize two raw labels and match them.
#[must_use]
pub fn matches_label(section_title: &str, folder_name: &str) -> bool {
    is_match(&normalize(section_title), &normalize(folder_name))
}

fn significant_words(label: &str) -> impl Iterator<Item = &str> {
    label
        .split_whitespace()
        .filter(|word| word.chars().count() >= SIGNIFICANT_WORD_MIN_CHARS)
}
