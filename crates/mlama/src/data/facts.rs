use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{EntityLabels, GenderTable};
use crate::error::{LoadError, read_resource};
use crate::probe::ProbeConfig;
use crate::types::Fact;

/// One line of a relation's fact file, before labels are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFact {
    pub sub_uri: String,
    pub obj_uri: String,
    #[serde(default)]
    pub predicate_id: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    /// Labels in the dataset's own language, used when it is the fallback
    /// language and the label table has nothing better.
    #[serde(default)]
    pub sub_label: Option<String>,
    #[serde(default)]
    pub obj_label: Option<String>,
}

/// Parses JSON-lines fact content. Blank lines are skipped.
pub fn parse_facts(content: &str) -> Result<Vec<RawFact>, LoadError> {
    parse_fact_lines(content, Path::new("<facts>"))
}

/// Reads a JSON-lines fact file.
pub fn read_facts(path: impl AsRef<Path>) -> Result<Vec<RawFact>, LoadError> {
    let path = path.as_ref();
    let content = read_resource(path)?;
    parse_fact_lines(&content, path)
}

fn parse_fact_lines(content: &str, path: &Path) -> Result<Vec<RawFact>, LoadError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Which facts to probe, by whether both entities have a label in the
/// target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    #[default]
    All,
    /// Only facts whose subject and object are both labelled.
    Trans,
    /// Only facts where at least one label is missing.
    Non,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown portion '{0}', expected one of: all, trans, non")]
pub struct UnknownPortion(pub String);

impl FromStr for Portion {
    type Err = UnknownPortion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Portion::All),
            "trans" => Ok(Portion::Trans),
            "non" => Ok(Portion::Non),
            _ => Err(UnknownPortion(s.to_string())),
        }
    }
}

impl Display for Portion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Portion::All => "all",
            Portion::Trans => "trans",
            Portion::Non => "non",
        })
    }
}

/// Counts from [`resolve_facts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactStats {
    pub kept: usize,
    /// Dropped by the portion filter.
    pub skipped_portion: usize,
    /// No label in the target or the fallback language.
    pub missing_label: usize,
}

/// Attaches labels and genders to raw facts for `language`.
///
/// Facts are filtered by `config.portion`. Missing labels fall back to
/// `config.fallback_language`, for each entity separately or, with
/// `config.sub_obj_same_lang`, for both together. Facts that still lack a
/// label are dropped and counted.
pub fn resolve_facts(
    relation: &str,
    raw: &[RawFact],
    labels: &EntityLabels,
    genders: &GenderTable,
    language: &str,
    config: &ProbeConfig,
) -> (Vec<Fact>, FactStats) {
    let mut facts = Vec::new();
    let mut stats = FactStats::default();
    let fallback = config.fallback_language.as_str();

    for fact in raw {
        let sub_exists = labels.has_label(&fact.sub_uri, language);
        let obj_exists = labels.has_label(&fact.obj_uri, language);
        let both_exist = sub_exists && obj_exists;
        match config.portion {
            Portion::Trans if !both_exist => {
                stats.skipped_portion += 1;
                continue;
            }
            Portion::Non if both_exist => {
                stats.skipped_portion += 1;
                continue;
            }
            Portion::All | Portion::Trans | Portion::Non => {}
        }

        let (sub_lang, obj_lang) = if config.sub_obj_same_lang {
            let lang = if both_exist { language } else { fallback };
            (lang, lang)
        } else {
            (
                if sub_exists { language } else { fallback },
                if obj_exists { language } else { fallback },
            )
        };

        let sub_label = label_for(labels, &fact.sub_uri, sub_lang, fallback, fact.sub_label.as_deref());
        let obj_label = label_for(labels, &fact.obj_uri, obj_lang, fallback, fact.obj_label.as_deref());
        let (Some(sub_label), Some(obj_label)) = (sub_label, obj_label) else {
            warn!(
                relation,
                sub_uri = %fact.sub_uri,
                obj_uri = %fact.obj_uri,
                "skipping fact without labels"
            );
            stats.missing_label += 1;
            continue;
        };

        facts.push(
            Fact::builder()
                .maybe_uuid(fact.uuid.clone())
                .relation_id(relation)
                .sub_uri(fact.sub_uri.as_str())
                .sub_label(sub_label)
                .sub_gender(genders.get(&fact.sub_uri))
                .obj_uri(fact.obj_uri.as_str())
                .obj_label(obj_label)
                .obj_gender(genders.get(&fact.obj_uri))
                .build(),
        );
        stats.kept += 1;
    }

    (facts, stats)
}

fn label_for(
    labels: &EntityLabels,
    uri: &str,
    lang: &str,
    fallback: &str,
    dataset_label: Option<&str>,
) -> Option<String> {
    labels
        .label(uri, lang)
        .or(dataset_label.filter(|_| lang == fallback))
        .map(str::to_string)
}
