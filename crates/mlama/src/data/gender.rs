use std::collections::HashMap;
use std::path::Path;

use crate::error::{LoadError, read_resource};
use crate::types::Gender;

/// Entity URI to gender metadata (`uri<TAB>male|female|none`).
#[derive(Debug, Clone, Default)]
pub struct GenderTable {
    genders: HashMap<String, Gender>,
}

impl GenderTable {
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Self::parse_lines(content, Path::new("<gender table>"))
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
            let Some((uri, gender)) = line.split_once('\t') else {
                return Err(LoadError::parse(path, index + 1, "expected 'uri<TAB>gender'"));
            };
            let gender = gender
                .parse::<Gender>()
                .map_err(|e| LoadError::parse(path, index + 1, format!("{e}")))?;
            table.genders.insert(uri.to_string(), gender);
        }
        Ok(table)
    }

    pub fn insert(&mut self, uri: impl Into<String>, gender: Gender) {
        self.genders.insert(uri.into(), gender);
    }

    /// Gender of an entity; entities missing from the table are `Unknown`.
    pub fn get(&self, uri: &str) -> Gender {
        self.genders.get(uri).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.genders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genders.is_empty()
    }
}
