use unicode_normalization::UnicodeNormalization;

use super::engine::{self, Fill};
use super::normalize::normalize_greek;
use super::options::{LanguageResources, RenderOptions};
use super::template::{EntitySlot, Placeholder, Template};
use super::RenderedInstance;
use crate::article::{ArticleKey, ArticleTable};
use crate::classify::{GREEK_ENDINGS, GREEK_SKIP_SUFFIXES, infer_gender_from_ending, should_skip_inflection};
use crate::error::RenderError;
use crate::inflection::InflectionLookup;
use crate::types::{
    Case, Entity, FeatureBundle, Gender, GrammaticalGender, Number, ResolvedGender,
};

/// Greek renderer: case inflection for `Gen`/`Acc` slots and article agreement.
#[derive(Debug, Clone)]
pub struct GreekPrompt {
    options: RenderOptions,
    inflection: InflectionLookup,
    articles: ArticleTable,
}

impl GreekPrompt {
    /// Language code of the Greek UniMorph tables.
    pub const INFLECTION_LANGUAGE: &'static str = "ell2";

    pub fn new(options: RenderOptions, resources: LanguageResources) -> Self {
        Self {
            options,
            inflection: resources.inflection,
            articles: resources.articles.unwrap_or_else(ArticleTable::greek),
        }
    }

    /// Gender and number of a label.
    ///
    /// Labels ending in `-ες` are read as feminine plurals and labels ending in
    /// `-ά` as neuter plurals, whatever the gender metadata says.
    pub fn resolve_gender(label: &str, gender: Gender) -> (ResolvedGender, Number) {
        let normalized: String = label.trim().nfc().collect();
        if normalized.ends_with("ες") {
            return (ResolvedGender::inferred(GrammaticalGender::Fem), Number::Plural);
        }
        if normalized.ends_with('ά') {
            return (ResolvedGender::inferred(GrammaticalGender::Neut), Number::Plural);
        }
        let resolved = match gender {
            Gender::Male => ResolvedGender::known(GrammaticalGender::Masc),
            Gender::Female => ResolvedGender::known(GrammaticalGender::Fem),
            Gender::None => ResolvedGender::unspecified(GrammaticalGender::Neut),
            Gender::Unknown => {
                ResolvedGender::inferred(infer_gender_from_ending(label, &GREEK_ENDINGS))
            }
        };
        (resolved, Number::Singular)
    }

    pub(super) fn fill(
        &self,
        template: &Template,
        entity: Entity,
        label: &str,
        gender: Gender,
        fill: Fill<'_>,
    ) -> Result<RenderedInstance, RenderError> {
        let slot = engine::entity_slot(template, entity, "el", accepts)?;
        let article = engine::article_slot(template, entity)?;
        let (resolved, number) = Self::resolve_gender(label, gender);
        let case = slot.case.unwrap_or(Case::Nominative);

        let do_not_inflect = should_skip_inflection(label, GREEK_SKIP_SUFFIXES)
            || self.options.disable_inflection.contains(entity);
        let inflected = if case == Case::Nominative || do_not_inflect {
            label.to_string()
        } else {
            let features = FeatureBundle::noun(case, number);
            self.inflection
                .first_form(label, &features, Self::INFLECTION_LANGUAGE)?
        };

        let article_text = match article {
            Some(_) if self.options.disable_article => Some(String::new()),
            Some(article) => {
                let key = ArticleKey {
                    definiteness: article.definiteness,
                    fused: article.fused,
                    gender: article.gender.unwrap_or(resolved.gender),
                    number,
                    case: match article.gender {
                        Some(_) => None,
                        None => Some(article.case.unwrap_or(case)),
                    },
                };
                Some(self.articles.resolve(&key)?.to_string())
            }
            None => None,
        };

        let slot_text = fill.text(&inflected);
        let text = engine::substitute(template, |placeholder, source| {
            if placeholder.entity() != entity {
                return Ok(None);
            }
            match placeholder {
                Placeholder::Entity(_) => Ok(Some(slot_text.clone())),
                Placeholder::Article(_) => Ok(article_text.clone()),
                Placeholder::Agreement(_) => Err(engine::unsupported(source, "el")),
            }
        })?;

        Ok(RenderedInstance {
            text,
            label: inflected,
        })
    }

    /// Strips diacritics and lowercases, keeping the mask symbol intact.
    pub fn normalize(&self, text: &str, mask_symbol: &str) -> String {
        normalize_greek(text, mask_symbol)
    }
}

/// Greek slots: bare, `Nom`, `Gen` and `Acc`, without gender overrides.
pub(super) fn accepts(slot: &EntitySlot) -> bool {
    slot.gender.is_none()
        && matches!(
            slot.case,
            None | Some(Case::Nominative | Case::Genitive | Case::Accusative)
        )
}
