use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::{InflectionError, Inflector};
use crate::error::{LoadError, read_resource};
use crate::types::FeatureBundle;

/// One inflected form of a lemma with its feature tag set.
#[derive(Debug, Clone)]
struct Paradigm {
    tags: BTreeSet<String>,
    form: String,
}

/// An [`Inflector`] backed by UniMorph tables.
///
/// Tables are tab-separated `lemma<TAB>form<TAB>features` lines, loaded per
/// resource language code (`ell2`, `rus`, ...). Feature matching ignores tag
/// order, so `N;GEN;SG` matches a table entry written `N;SG;GEN`.
#[derive(Debug, Clone, Default)]
pub struct UnimorphTable {
    /// language -> lemma -> forms in file order.
    languages: HashMap<String, HashMap<String, Vec<Paradigm>>>,
}

impl UnimorphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table file for `language`, adding to any forms already loaded.
    ///
    /// Returns the number of forms read.
    pub fn load(&mut self, language: &str, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        self.load_lines(language, &content, path)
    }

    /// Loads table content from a string.
    pub fn load_str(&mut self, language: &str, content: &str) -> Result<usize, LoadError> {
        let label = format!("<{language} unimorph>");
        self.load_lines(language, content, Path::new(&label))
    }

    /// Adds a single form.
    pub fn insert(&mut self, language: &str, lemma: &str, form: &str, features: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .entry(lemma.to_string())
            .or_default()
            .push(Paradigm {
                tags: tag_set(features.split(';')),
                form: form.to_string(),
            });
    }

    /// Number of lemmas known for `language`.
    pub fn lemma_count(&self, language: &str) -> usize {
        self.languages.get(language).map_or(0, HashMap::len)
    }

    fn load_lines(&mut self, language: &str, content: &str, path: &Path) -> Result<usize, LoadError> {
        let mut count = 0;
        for (index, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(lemma), Some(form), Some(features)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(LoadError::parse(
                    path,
                    index + 1,
                    "expected 'lemma<TAB>form<TAB>features'",
                ));
            };
            if lemma.is_empty() || features.is_empty() {
                return Err(LoadError::parse(path, index + 1, "empty lemma or feature field"));
            }
            self.insert(language, lemma, form, features);
            count += 1;
        }
        Ok(count)
    }
}

fn tag_set<'a>(tags: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    tags.map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

impl Inflector for UnimorphTable {
    fn inflect(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        language: &str,
    ) -> Result<Vec<String>, InflectionError> {
        let paradigms = self
            .languages
            .get(language)
            .and_then(|lemmas| lemmas.get(lemma))
            .ok_or_else(|| InflectionError::UnknownLemma {
                lemma: lemma.to_string(),
                language: language.to_string(),
            })?;

        let wanted = tag_set(features.tags().into_iter());
        let forms: Vec<String> = paradigms
            .iter()
            .filter(|paradigm| paradigm.tags == wanted)
            .map(|paradigm| paradigm.form.clone())
            .collect();

        if forms.is_empty() {
            return Err(InflectionError::MissingForm {
                lemma: lemma.to_string(),
                features: features.to_string(),
                language: language.to_string(),
            });
        }
        Ok(forms)
    }
}
