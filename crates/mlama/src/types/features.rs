use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{Case, GrammaticalGender, Number};

/// Part of speech of a lemma handed to the inflection resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
}

impl PartOfSpeech {
    pub fn tag(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "N",
            PartOfSpeech::Verb => "V",
            PartOfSpeech::Adjective => "ADJ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Past,
}

impl Tense {
    pub fn tag(self) -> &'static str {
        match self {
            Tense::Past => "PST",
        }
    }
}

/// A morphological feature bundle, rendered as a UniMorph tag string.
///
/// The tag order follows the conventions of the UniMorph tables for each part
/// of speech: `N;GEN;SG`, `V;PST;SG;MASC`, `ADJ;FEM;SG;LGSPEC1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureBundle {
    pub pos: PartOfSpeech,
    pub case: Option<Case>,
    pub number: Option<Number>,
    pub gender: Option<GrammaticalGender>,
    pub tense: Option<Tense>,
    /// Language-specific tag appended verbatim (e.g. `LGSPEC1`).
    pub extra: Option<String>,
}

impl FeatureBundle {
    /// A noun in the given case and number.
    pub fn noun(case: Case, number: Number) -> Self {
        Self {
            pos: PartOfSpeech::Noun,
            case: Some(case),
            number: Some(number),
            gender: None,
            tense: None,
            extra: None,
        }
    }

    /// A past-tense verb agreeing in number and gender.
    pub fn past_verb(number: Number, gender: GrammaticalGender) -> Self {
        Self {
            pos: PartOfSpeech::Verb,
            case: None,
            number: Some(number),
            gender: Some(gender),
            tense: Some(Tense::Past),
            extra: None,
        }
    }

    /// A long-form (attributive) adjective agreeing in gender and number.
    pub fn long_adjective(gender: GrammaticalGender, number: Number) -> Self {
        Self {
            pos: PartOfSpeech::Adjective,
            case: None,
            number: Some(number),
            gender: Some(gender),
            tense: None,
            extra: Some("LGSPEC1".to_string()),
        }
    }

    /// The tags of this bundle in UniMorph order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = vec![self.pos.tag()];
        let number = self.number.map(Number::tag);
        let gender = self.gender.map(GrammaticalGender::tag);
        match self.pos {
            PartOfSpeech::Noun => {
                tags.extend(self.case.map(Case::tag));
                tags.extend(number);
                tags.extend(gender);
            }
            PartOfSpeech::Verb => {
                tags.extend(self.tense.map(Tense::tag));
                tags.extend(self.case.map(Case::tag));
                tags.extend(number);
                tags.extend(gender);
            }
            PartOfSpeech::Adjective => {
                tags.extend(gender);
                tags.extend(number);
                tags.extend(self.case.map(Case::tag));
            }
        }
        tags.extend(self.extra.as_deref());
        tags
    }
}

impl Display for FeatureBundle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.tags().join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_unimorph_strings() {
        assert_eq!(
            FeatureBundle::noun(Case::Genitive, Number::Singular).to_string(),
            "N;GEN;SG"
        );
        assert_eq!(
            FeatureBundle::past_verb(Number::Singular, GrammaticalGender::Fem).to_string(),
            "V;PST;SG;FEM"
        );
        assert_eq!(
            FeatureBundle::long_adjective(GrammaticalGender::Masc, Number::Singular).to_string(),
            "ADJ;MASC;SG;LGSPEC1"
        );
    }
}
