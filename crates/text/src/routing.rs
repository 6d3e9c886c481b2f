use crate::matcher::{is_match, normalize};
use log::debug;
use serde::{Deserialize, Serialize};

/// Content shown for a report section that no folder fed.
pub const DEFAULT_PLACEHOLDER: &str = "Aucune information disponible pour cette section.";

/// A single uploaded file, already converted to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// A folder of a case file and the text of its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContent {
    pub name: String,
    #[serde(default)]
    pub files: Vec<FolderFile>,
}

/// A report section with the content routed into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedSection {
    pub title: String,
    /// Names of the folders that contributed content, in folder order
    pub folders: Vec<String>,
    pub content: String,
    pub is_placeholder: bool,
}

/// Routes folder contents into report sections by label matching.
#[derive(Debug, Clone)]
pub struct SectionRouter {
    placeholder: String,
}

impl SectionRouter {
    pub fn new() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Use a custom text for sections without content
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Build one [`RoutedSection`] per section title, in template order.
    ///
    /// A folder may feed several sections. Files with blank content are
    /// skipped; a section left without content gets the placeholder.
    pub fn route<S: AsRef<str>>(
        &self,
        sections: &[S],
        folders: &[FolderContent],
    ) -> Vec<RoutedSection> {
        let folder_keys: Vec<String> = folders.iter().map(|f| normalize(&f.name)).collect();

        sections
            .iter()
            .map(|title| {
                let title = title.as_ref();
                let key = normalize(title);

                let mut contributors = Vec::new();
                let mut blocks = Vec::new();
                for (folder, folder_key) in folders.iter().zip(&folder_keys) {
                    if !is_match(&key, folder_key) {
                        continue;
                    }
                    let before = blocks.len();
                    blocks.extend(
                        folder
                            .files
                            .iter()
                            .filter(|file| !file.content.trim().is_empty())
                            .map(|file| format!("### {}\n{}", file.name, file.content.trim())),
                    );
                    if blocks.len() > before {
                        contributors.push(folder.name.clone());
                    }
                }

                if blocks.is_empty() {
                    debug!("section '{title}': no matching content, using placeholder");
                    return RoutedSection {
                        title: title.to_string(),
                        folders: Vec::new(),
                        content: self.placeholder.clone(),
                        is_placeholder: true,
                    };
                }

                debug!(
                    "section '{title}': {} file(s) from {:?}",
                    blocks.len(),
                    contributors
                );
                RoutedSection {
                    title: title.to_string(),
                    folders: contributors,
                    content: blocks.join("\n\n"),
                    is_placeholder: false,
                }
            })
            .collect()
    }
}

impl Default for SectionRouter {
    fn default() -> Self {
        Self::new()
    }
}
