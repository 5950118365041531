use super::engine::{self, Fill};
use super::options::RenderOptions;
use super::template::{AgreementFeature, AgreementSlot, EntitySlot, Placeholder, Template};
use super::RenderedInstance;
use crate::classify::{RUSSIAN_ENDINGS, infer_gender_from_ending, should_skip_inflection};
use crate::error::RenderError;
use crate::inflection::InflectionLookup;
use crate::types::{
    Case, Entity, FeatureBundle, Gender, GrammaticalGender, Number, ResolvedGender,
};

/// Russian renderer: case inflection plus gender agreement of verbs and
/// adjectives. Russian has no articles.
#[derive(Debug, Clone)]
pub struct RussianPrompt {
    options: RenderOptions,
    inflection: InflectionLookup,
}

impl RussianPrompt {
    /// Language code of the Russian UniMorph tables.
    pub const INFLECTION_LANGUAGE: &'static str = "rus";

    pub fn new(options: RenderOptions, inflection: InflectionLookup) -> Self {
        Self {
            options,
            inflection,
        }
    }

    /// Gender of a label. Entities without usable metadata get the gender
    /// suggested by their ending.
    pub fn resolve_gender(label: &str, gender: Gender) -> ResolvedGender {
        match gender {
            Gender::Male => ResolvedGender::known(GrammaticalGender::Masc),
            Gender::Female => ResolvedGender::known(GrammaticalGender::Fem),
            Gender::None | Gender::Unknown => {
                ResolvedGender::inferred(infer_gender_from_ending(label, &RUSSIAN_ENDINGS))
            }
        }
    }

    pub(super) fn fill(
        &self,
        template: &Template,
        entity: Entity,
        label: &str,
        gender: Gender,
        fill: Fill<'_>,
    ) -> Result<RenderedInstance, RenderError> {
        let slot = engine::entity_slot(template, entity, "ru", |slot| accepts(entity, slot))?;
        let resolved = match slot.gender {
            Some(forced) => ResolvedGender::known(forced),
            None => Self::resolve_gender(label, gender),
        };
        let case = slot.case.unwrap_or(Case::Nominative);
        let disabled = self.options.disable_inflection.contains(entity);

        let do_not_inflect = should_skip_inflection(label, &[]) || disabled;
        let inflected = if case == Case::Nominative || do_not_inflect {
            label.to_string()
        } else {
            let features = FeatureBundle::noun(case, Number::Singular);
            self.inflection
                .first_form(label, &features, Self::INFLECTION_LANGUAGE)?
        };

        let slot_text = fill.text(&inflected);
        let text = engine::substitute(template, |placeholder, source| {
            if placeholder.entity() != entity {
                return Ok(None);
            }
            match placeholder {
                Placeholder::Entity(_) => Ok(Some(slot_text.clone())),
                Placeholder::Article(_) => Err(engine::unsupported(source, "ru")),
                Placeholder::Agreement(agreement) => self
                    .agree(agreement, resolved.gender, disabled)
                    .map(Some),
            }
        })?;

        Ok(RenderedInstance {
            text,
            label: inflected,
        })
    }

    fn agree(
        &self,
        slot: &AgreementSlot,
        gender: GrammaticalGender,
        disabled: bool,
    ) -> Result<String, RenderError> {
        match slot {
            AgreementSlot::Choice {
                gendered, neuter, ..
            } => Ok(match gender {
                GrammaticalGender::Masc | GrammaticalGender::Fem => gendered.clone(),
                GrammaticalGender::Neut => neuter.clone(),
            }),
            AgreementSlot::Inflect { lemma, feature, .. } => {
                let features = match (feature, disabled) {
                    (None, _) | (_, true) => return Ok(lemma.clone()),
                    (Some(AgreementFeature::PastVerb), false) => {
                        FeatureBundle::past_verb(Number::Singular, gender)
                    }
                    (Some(AgreementFeature::LongAdjective), false) => {
                        FeatureBundle::long_adjective(gender, Number::Singular)
                    }
                };
                Ok(self
                    .inflection
                    .first_form(lemma, &features, Self::INFLECTION_LANGUAGE)?)
            }
        }
    }
}

/// Subject slots: bare, `Nom`, `Masc.Nom`, `Gen`, `Ess`.
/// Object slots: bare, `Nom`, `Gen`, `Acc`, `Dat`, `Ess`, `Ins`.
pub(super) fn accepts(entity: Entity, slot: &EntitySlot) -> bool {
    match (entity, slot.gender, slot.case) {
        (Entity::Subject, None, None | Some(Case::Nominative | Case::Genitive | Case::Essive)) => {
            true
        }
        (Entity::Subject, Some(GrammaticalGender::Masc), Some(Case::Nominative)) => true,
        (Entity::Object, None, _) => true,
        _ => false,
    }
}
