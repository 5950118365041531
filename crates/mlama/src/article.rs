//! Article tables: composite grammatical keys mapped to article surface forms.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::error::{LoadError, RenderError, read_resource};
use crate::types::{Case, GrammaticalGender, Number};

/// Definite or indefinite article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Definiteness {
    Definite,
    Indefinite,
}

impl Definiteness {
    pub const ALL: [Definiteness; 2] = [Definiteness::Definite, Definiteness::Indefinite];

    pub fn tag(self) -> &'static str {
        match self {
            Definiteness::Definite => "DEF",
            Definiteness::Indefinite => "INDEF",
        }
    }
}

/// The grammatical coordinates of one article form.
///
/// Displays as the composite key used by article table files, e.g.
/// `ART;DEF;MASC;SG;NOM` or `ART;PREPDEF;FEM;PL;ACC`. Keys without a case
/// (`ART;DEF;FEM;SG`) are used by slots that fix the gender explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleKey {
    pub definiteness: Definiteness,
    /// Article fused with a preceding preposition (Greek `σε` + article).
    pub fused: bool,
    pub gender: GrammaticalGender,
    pub number: Number,
    pub case: Option<Case>,
}

impl Display for ArticleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let prefix = if self.fused { "PREP" } else { "" };
        write!(
            f,
            "ART;{prefix}{};{};{}",
            self.definiteness.tag(),
            self.gender.tag(),
            self.number.tag()
        )?;
        if let Some(case) = self.case {
            write!(f, ";{}", case.tag())?;
        }
        Ok(())
    }
}

/// One cell of an article coverage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageEntry<'a> {
    pub key: ArticleKey,
    pub form: Option<&'a str>,
}

/// Article forms for a single language, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ArticleTable {
    language: String,
    forms: HashMap<String, String>,
}

const GREEK_ARTICLES: &[(&str, &str)] = &[
    // Definite, singular
    ("ο", "ART;DEF;MASC;SG;NOM"),
    ("του", "ART;DEF;MASC;SG;GEN"),
    ("τον", "ART;DEF;MASC;SG;ACC"),
    ("η", "ART;DEF;FEM;SG;NOM"),
    ("της", "ART;DEF;FEM;SG;GEN"),
    ("την", "ART;DEF;FEM;SG;ACC"),
    ("το", "ART;DEF;NEUT;SG;NOM"),
    ("του", "ART;DEF;NEUT;SG;GEN"),
    ("το", "ART;DEF;NEUT;SG;ACC"),
    // Definite, plural
    ("οι", "ART;DEF;MASC;PL;NOM"),
    ("των", "ART;DEF;MASC;PL;GEN"),
    ("τους", "ART;DEF;MASC;PL;ACC"),
    ("οι", "ART;DEF;FEM;PL;NOM"),
    ("των", "ART;DEF;FEM;PL;GEN"),
    ("τις", "ART;DEF;FEM;PL;ACC"),
    ("τα", "ART;DEF;NEUT;PL;NOM"),
    ("των", "ART;DEF;NEUT;PL;GEN"),
    ("τα", "ART;DEF;NEUT;PL;ACC"),
    // Indefinite (singular only)
    ("ένας", "ART;INDEF;MASC;SG;NOM"),
    ("ενός", "ART;INDEF;MASC;SG;GEN"),
    ("έναν", "ART;INDEF;MASC;SG;ACC"),
    ("μία", "ART;INDEF;FEM;SG;NOM"),
    ("μίας", "ART;INDEF;FEM;SG;GEN"),
    ("μία", "ART;INDEF;FEM;SG;ACC"),
    ("ένα", "ART;INDEF;NEUT;SG;NOM"),
    ("ενός", "ART;INDEF;NEUT;SG;GEN"),
    ("ένα", "ART;INDEF;NEUT;SG;ACC"),
    // Preposition σε fused with the definite article
    ("στου", "ART;PREPDEF;MASC;SG;GEN"),
    ("στον", "ART;PREPDEF;MASC;SG;ACC"),
    ("στης", "ART;PREPDEF;FEM;SG;GEN"),
    ("στην", "ART;PREPDEF;FEM;SG;ACC"),
    ("στου", "ART;PREPDEF;NEUT;SG;GEN"),
    ("στο", "ART;PREPDEF;NEUT;SG;ACC"),
    ("στων", "ART;PREPDEF;MASC;PL;GEN"),
    ("στους", "ART;PREPDEF;MASC;PL;ACC"),
    ("στων", "ART;PREPDEF;FEM;PL;GEN"),
    ("στις", "ART;PREPDEF;FEM;PL;ACC"),
    ("στων", "ART;PREPDEF;NEUT;PL;GEN"),
    ("στα", "ART;PREPDEF;NEUT;PL;ACC"),
    // Case-less feminine keys
    ("η", "ART;DEF;FEM;SG"),
    ("οι", "ART;DEF;FEM;PL"),
];

impl ArticleTable {
    /// Creates an empty table for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            forms: HashMap::new(),
        }
    }

    /// The Greek article table bundled with the crate.
    pub fn greek() -> Self {
        let mut table = Self::new("el");
        for (form, key) in GREEK_ARTICLES {
            table.insert(*key, *form);
        }
        table
    }

    /// Parses `surface<TAB>key` lines. Blank lines and `#` comments are
    /// skipped; later lines override earlier ones for the same key.
    pub fn parse(language: impl Into<String>, content: &str) -> Result<Self, LoadError> {
        let language = language.into();
        let label = format!("<{language} articles>");
        Self::parse_lines(language, content, Path::new(&label))
    }

    /// Loads an article table file.
    pub fn load(language: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        Self::parse_lines(language.into(), &content, path)
    }

    fn parse_lines(language: String, content: &str, path: &Path) -> Result<Self, LoadError> {
        let mut table = Self::new(language);
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((form, key)) = line.split_once('\t') else {
                return Err(LoadError::parse(
                    path,
                    index + 1,
                    "expected 'surface<TAB>key'",
                ));
            };
            let key = key.trim();
            if !key.starts_with("ART;") {
                return Err(LoadError::parse(
                    path,
                    index + 1,
                    format!("article key '{key}' does not start with 'ART;'"),
                ));
            }
            table.insert(key, form.trim());
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: impl Into<String>, form: impl Into<String>) {
        self.forms.insert(key.into(), form.into());
    }

    /// Looks up a raw composite key string.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.forms.get(key).map(String::as_str)
    }

    /// Resolves an article, failing if the table has no form for the key.
    pub fn resolve(&self, key: &ArticleKey) -> Result<&str, RenderError> {
        let key = key.to_string();
        self.get(&key)
            .ok_or_else(|| RenderError::MissingArticleForm {
                key,
                language: self.language.clone(),
            })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Reports which keys of the definiteness × fusion × gender × number ×
    /// case grid have a form, in a stable order.
    pub fn coverage(&self, cases: &[Case]) -> Vec<CoverageEntry<'_>> {
        let mut entries = Vec::new();
        for definiteness in Definiteness::ALL {
            for fused in [false, true] {
                for gender in GrammaticalGender::ALL {
                    for number in Number::ALL {
                        for &case in cases {
                            let key = ArticleKey {
                                definiteness,
                                fused,
                                gender,
                                number,
                                case: Some(case),
                            };
                            entries.push(CoverageEntry {
                                key,
                                form: self.get(&key.to_string()),
                            });
                        }
                    }
                }
            }
        }
        entries
    }
}
