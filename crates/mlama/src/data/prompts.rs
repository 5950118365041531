use std::collections::HashMap;
use std::path::Path;

use crate::error::{LoadError, read_resource};

/// Prompt templates per relation and language.
///
/// A tab-separated file whose header row is `pid` followed by language codes.
/// Each further row holds one template per language for the relation in the
/// `pid` column. Repeating a `pid` adds alternative templates, ranked by file
/// order. Empty cells mean the relation has no template in that language.
///
/// Cells are taken verbatim: there is no quoting. A comma-separated prompt
/// file with quoted cells, such as `TREx_prompts.csv`, must be re-exported
/// with a tab delimiter and no quote characters first:
///
/// ```text
/// import csv, pandas
/// pandas.read_csv("TREx_prompts.csv").to_csv(
///     "TREx_prompts.tsv", sep="\t", index=False, quoting=csv.QUOTE_NONE)
/// ```
///
/// Templates contain commas, so a plain `tr , '\t'` is not enough.
///
/// ```
/// use mlama::data::PromptTable;
///
/// let table = PromptTable::parse(
///     "pid\ten\tel\n\
///      P19\t[X] was born in [Y].\t[X] γεννήθηκε στην [Y.Acc].\n\
///      P19\t[X] is a native of [Y].\t\n",
/// )
/// .unwrap();
/// assert_eq!(table.template("P19", "el"), Some("[X] γεννήθηκε στην [Y.Acc]."));
/// assert_eq!(table.templates("P19", "en").len(), 2);
/// assert_eq!(table.templates("P19", "el").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptTable {
    languages: Vec<String>,
    relations: Vec<String>,
    /// relation -> language -> templates in rank order.
    templates: HashMap<String, HashMap<String, Vec<String>>>,
}

impl PromptTable {
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Self::parse_lines(content, Path::new("<prompt table>"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        Self::parse_lines(&content, path)
    }

    fn parse_lines(content: &str, path: &Path) -> Result<Self, LoadError> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((header_index, header)) = lines.next() else {
            return Err(LoadError::parse(path, 1, "missing header row"));
        };
        let mut columns = header.trim_end_matches('\r').split('\t');
        if !header.contains('\t') && header.trim_start().starts_with("pid,") {
            return Err(LoadError::parse(
                path,
                header_index + 1,
                "comma-separated header; convert the file to tab-separated first",
            ));
        }
        if columns.next().map(str::trim) != Some("pid") {
            return Err(LoadError::parse(
                path,
                header_index + 1,
                "header must start with 'pid'",
            ));
        }
        let mut table = Self {
            languages: columns.map(|lang| lang.trim().to_string()).collect(),
            ..Self::default()
        };

        for (index, line) in lines {
            let mut cells = line.trim_end_matches('\r').split('\t');
            let Some(relation) = cells.next().map(str::trim) else {
                continue;
            };
            let cells: Vec<&str> = cells.collect();
            if cells.len() > table.languages.len() {
                return Err(LoadError::parse(
                    path,
                    index + 1,
                    format!(
                        "{} template cells but only {} languages in the header",
                        cells.len(),
                        table.languages.len()
                    ),
                ));
            }
            if !table.templates.contains_key(relation) {
                table.relations.push(relation.to_string());
            }
            let by_language = table.templates.entry(relation.to_string()).or_default();
            for (lang, cell) in table.languages.iter().zip(cells) {
                let cell = cell.trim();
                if !cell.is_empty() {
                    by_language
                        .entry(lang.clone())
                        .or_default()
                        .push(cell.to_string());
                }
            }
        }
        Ok(table)
    }

    /// The top-ranked template.
    pub fn template(&self, relation: &str, lang: &str) -> Option<&str> {
        self.templates(relation, lang).first().map(String::as_str)
    }

    /// All templates in rank order.
    pub fn templates(&self, relation: &str, lang: &str) -> &[String] {
        self.templates
            .get(relation)
            .and_then(|by_language| by_language.get(lang))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Relations in file order.
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// Language columns in header order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}
