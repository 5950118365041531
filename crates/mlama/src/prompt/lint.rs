//! Static checks over templates, without rendering anything.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use strsim::levenshtein;

use super::template::{ArticleSlot, Placeholder, Template, parse_template};
use super::{greek, russian};
use crate::article::{ArticleKey, ArticleTable};
use crate::types::{Case, Entity, GrammaticalGender, Number};

/// A problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemplateWarning {
    /// A bracketed token that is not a placeholder at all.
    UnknownPlaceholder {
        token: String,
        suggestions: Vec<String>,
    },
    /// A placeholder the language's renderer does not implement.
    UnsupportedPlaceholder { token: String, language: String },
    /// An article slot that no gender or number of the entity can fill from
    /// the article table.
    UnresolvableArticle { token: String, language: String },
    /// No slot for the entity.
    MissingSlot { entity: Entity },
    /// Several slots of the same kind for one entity.
    ConflictingSlots { entity: Entity, tokens: Vec<String> },
}

impl Display for TemplateWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TemplateWarning::UnknownPlaceholder { token, suggestions } => {
                write!(f, "unknown placeholder '{token}'")?;
                if let Some(first) = suggestions.first() {
                    write!(f, ", did you mean '{first}'?")?;
                }
                Ok(())
            }
            TemplateWarning::UnsupportedPlaceholder { token, language } => {
                write!(f, "placeholder '{token}' is not supported for language '{language}'")
            }
            TemplateWarning::UnresolvableArticle { token, language } => {
                write!(f, "article '{token}' has no form in the '{language}' article table")
            }
            TemplateWarning::MissingSlot { entity } => write!(f, "no [{entity}] slot"),
            TemplateWarning::ConflictingSlots { entity, tokens } => {
                write!(f, "conflicting slots for [{entity}]: {}", tokens.join(", "))
            }
        }
    }
}

/// Placeholders a language renders, in canonical spelling.
pub fn known_placeholders(language: &str) -> &'static [&'static str] {
    match language {
        "el" => &[
            "[X]", "[X.Nom]", "[X.Gen]", "[X.Acc]", "[Y]", "[Y.Nom]", "[Y.Gen]", "[Y.Acc]",
            "[DEF;X]", "[DEF.Gen;X]", "[PREPDEF;X]", "[DEF;Y]", "[DEF.Gen;Y]", "[PREPDEF;Y]",
            "[INDEF;Y]", "[DEF;Y.Fem]",
        ],
        "ru" => &[
            "[X]", "[X.Nom]", "[X.Masc.Nom]", "[X.Gen]", "[X.Ess]", "[Y]", "[Y.Nom]", "[Y.Gen]",
            "[Y.Acc]", "[Y.Dat]", "[Y.Ess]", "[Y.Ins]",
        ],
        _ => &["[X]", "[Y]"],
    }
}

/// Checks a template against what the renderer for `language` accepts.
///
/// Greek article slots are checked against the bundled article table.
/// Warnings come in template order, followed by per-entity slot problems.
pub fn lint_template(template: &str, language: &str) -> Vec<TemplateWarning> {
    lint_template_with_articles(template, language, &ArticleTable::greek())
}

/// Like [`lint_template`], checking Greek article slots against `articles`.
pub fn lint_template_with_articles(
    template: &str,
    language: &str,
    articles: &ArticleTable,
) -> Vec<TemplateWarning> {
    let parsed = parse_template(template);
    let mut warnings = Vec::new();

    for token in parsed.unrecognized() {
        warnings.push(TemplateWarning::UnknownPlaceholder {
            token: token.to_string(),
            suggestions: compute_suggestions(token, known_placeholders(language)),
        });
    }

    for (placeholder, source) in parsed.placeholders() {
        if !is_supported(placeholder, language) {
            warnings.push(TemplateWarning::UnsupportedPlaceholder {
                token: source.to_string(),
                language: language.to_string(),
            });
        } else if let (Placeholder::Article(slot), "el") = (placeholder, language) {
            if !article_resolves(slot, &parsed, articles) {
                warnings.push(TemplateWarning::UnresolvableArticle {
                    token: source.to_string(),
                    language: articles.language().to_string(),
                });
            }
        }
    }

    for entity in [Entity::Subject, Entity::Object] {
        let slots: Vec<&str> = parsed
            .placeholders()
            .filter(|(placeholder, _)| {
                matches!(placeholder, Placeholder::Entity(slot) if slot.entity == entity)
            })
            .map(|(_, source)| source)
            .collect();
        let articles: Vec<&str> = parsed
            .placeholders()
            .filter(|(placeholder, _)| {
                matches!(placeholder, Placeholder::Article(slot) if slot.entity == entity)
            })
            .map(|(_, source)| source)
            .collect();

        if slots.is_empty() {
            warnings.push(TemplateWarning::MissingSlot { entity });
        }
        if is_inflecting(language) {
            for tokens in [slots, articles] {
                if tokens.len() > 1 {
                    warnings.push(TemplateWarning::ConflictingSlots {
                        entity,
                        tokens: tokens.into_iter().map(str::to_string).collect(),
                    });
                }
            }
        }
    }

    warnings
}

fn is_inflecting(language: &str) -> bool {
    matches!(language, "el" | "ru")
}

fn is_supported(placeholder: &Placeholder, language: &str) -> bool {
    match (language, placeholder) {
        ("el", Placeholder::Entity(slot)) => greek::accepts(slot),
        ("el", Placeholder::Article(_)) | ("ru", Placeholder::Agreement(_)) => true,
        ("ru", Placeholder::Entity(slot)) => russian::accepts(slot.entity, slot),
        (_, Placeholder::Entity(slot)) => slot.case.is_none() && slot.gender.is_none(),
        _ => false,
    }
}

/// Whether some gender and number of the entity give the article slot a form.
///
/// The case follows the renderer: the slot's own case, else the case of the
/// entity slot, else nominative. Slots with a fixed gender use case-less keys.
fn article_resolves(slot: &ArticleSlot, template: &Template, articles: &ArticleTable) -> bool {
    let entity_case = template.placeholders().find_map(|(placeholder, _)| match placeholder {
        Placeholder::Entity(entity_slot) if entity_slot.entity == slot.entity => entity_slot.case,
        _ => None,
    });
    let case = match slot.gender {
        Some(_) => None,
        None => Some(slot.case.or(entity_case).unwrap_or(Case::Nominative)),
    };
    let genders = slot
        .gender
        .map_or_else(|| GrammaticalGender::ALL.to_vec(), |gender| vec![gender]);

    genders.into_iter().any(|gender| {
        Number::ALL.into_iter().any(|number| {
            let key = ArticleKey {
                definiteness: slot.definiteness,
                fused: slot.fused,
                gender,
                number,
                case,
            };
            articles.resolve(&key).is_ok()
        })
    })
}

/// Up to three known placeholders within a small edit distance of `token`.
fn compute_suggestions(token: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if token.chars().count() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(token, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
