use std::collections::HashMap;
use std::path::Path;

use crate::error::{LoadError, read_resource};

/// Multilingual entity labels.
///
/// The file has one entity per line: the entity URI followed by
/// tab-separated `"label"@lang` cells.
///
/// ```
/// use mlama::data::EntityLabels;
///
/// let labels = EntityLabels::parse("Q90\t\"Paris\"@en\t\"Παρίσι\"@el\n").unwrap();
/// assert_eq!(labels.label("Q90", "el"), Some("Παρίσι"));
/// assert!(!labels.has_label("Q90", "ru"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityLabels {
    labels: HashMap<String, HashMap<String, String>>,
}

impl EntityLabels {
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Self::parse_lines(content, Path::new("<entity labels>"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        Self::parse_lines(&content, path)
    }

    fn parse_lines(content: &str, path: &Path) -> Result<Self, LoadError> {
        let mut table = Self::default();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut cells = line.split('\t');
            let Some(uri) = cells.next() else {
                continue;
            };
            let entry = table.labels.entry(uri.to_string()).or_default();
            for cell in cells {
                let Some((label, lang)) = cell.rsplit_once('@') else {
                    return Err(LoadError::parse(
                        path,
                        index + 1,
                        format!("label cell '{cell}' has no '@lang' suffix"),
                    ));
                };
                entry.insert(lang.to_string(), label.trim_matches('"').to_string());
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, uri: &str, lang: &str, label: impl Into<String>) {
        self.labels
            .entry(uri.to_string())
            .or_default()
            .insert(lang.to_string(), label.into());
    }

    pub fn label(&self, uri: &str, lang: &str) -> Option<&str> {
        self.labels.get(uri)?.get(lang).map(String::as_str)
    }

    pub fn has_label(&self, uri: &str, lang: &str) -> bool {
        self.label(uri, lang).is_some()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
