//! Template parser using winnow.
//!
//! A template is literal text interleaved with bracketed tokens. Recognised
//! tokens become [`Placeholder`]s:
//! - entity slots: `[X]`, `[Y.Gen]`, `[X.Masc.Nom]`
//! - article slots: `[DEF;X]`, `[DEF.Gen;Y]`, `[PREPDEF;X]`, `[INDEF;Y]`,
//!   `[DEF;Y.Fem]`
//! - agreement slots: `[был.X-Gender.Pst]`, `[родился;X-Gender|родилось;X-Gender]`
//!
//! Any other bracketed text is kept as an [`Segment::Unrecognized`] token and
//! rendered back verbatim.

use winnow::combinator::{alt, delimited, eof, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_till;

use crate::article::Definiteness;
use crate::types::{Case, Entity, GrammaticalGender};

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Placeholders in template order, with their source text.
    pub fn placeholders(&self) -> impl Iterator<Item = (&Placeholder, &str)> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder {
                placeholder,
                source,
            } => Some((placeholder, source.as_str())),
            Segment::Literal(_) | Segment::Unrecognized(_) => None,
        })
    }

    /// Bracketed tokens that are not placeholders.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Unrecognized(source) => Some(source.as_str()),
            Segment::Literal(_) | Segment::Placeholder { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        placeholder: Placeholder,
        /// The token as written, brackets included.
        source: String,
    },
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Entity(EntitySlot),
    Article(ArticleSlot),
    Agreement(AgreementSlot),
}

impl Placeholder {
    /// The entity this placeholder is filled from or agrees with.
    pub fn entity(&self) -> Entity {
        match self {
            Placeholder::Entity(slot) => slot.entity,
            Placeholder::Article(slot) => slot.entity,
            Placeholder::Agreement(slot) => slot.entity(),
        }
    }
}

/// `[X]`, `[X.<Case>]` or `[X.<Gender>.<Case>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySlot {
    pub entity: Entity,
    /// `None` for the bare slot, which implies the nominative.
    pub case: Option<Case>,
    /// Gender forced by the template, overriding the entity's own.
    pub gender: Option<GrammaticalGender>,
}

/// `[DEF;X]`, `[DEF.<Case>;X]`, `[PREPDEF;X]`, `[INDEF;Y]`, `[DEF;Y.<Gender>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSlot {
    pub entity: Entity,
    pub definiteness: Definiteness,
    pub fused: bool,
    /// Case fixed by the template instead of following the entity slot.
    pub case: Option<Case>,
    /// Gender fixed by the template; such slots use case-less keys.
    pub gender: Option<GrammaticalGender>,
}

/// A word that agrees in gender with an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementSlot {
    /// `[lemma.X-Gender]`, `[lemma.X-Gender.Pst]`, `[lemma.X-Gender.Lgspec1]`.
    Inflect {
        entity: Entity,
        lemma: String,
        feature: Option<AgreementFeature>,
    },
    /// `[formA;X-Gender|formB;X-Gender]`: `gendered` for masculine and
    /// feminine entities, `neuter` otherwise.
    Choice {
        entity: Entity,
        gendered: String,
        neuter: String,
    },
}

impl AgreementSlot {
    pub fn entity(&self) -> Entity {
        match self {
            AgreementSlot::Inflect { entity, .. } | AgreementSlot::Choice { entity, .. } => {
                *entity
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementFeature {
    /// Past-tense verb, `V;PST;SG;<gender>`.
    PastVerb,
    /// Long-form adjective, `ADJ;<gender>;SG;LGSPEC1`.
    LongAdjective,
}

/// Parses a template string.
///
/// Parsing never fails: text that does not form a placeholder is kept as
/// literal or unrecognised segments.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(parsed) if remaining.is_empty() => parsed,
        _ => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }
    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((bracketed, literal_run, stray_bracket)).parse_next(input)
}

fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., '[')
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

/// An opening bracket that is never closed.
fn stray_bracket(input: &mut &str) -> ModalResult<Segment> {
    '['.map(|_| Segment::Literal("[".to_string()))
        .parse_next(input)
}

fn bracketed(input: &mut &str) -> ModalResult<Segment> {
    let body: &str = delimited('[', take_till(0.., ['[', ']']), ']').parse_next(input)?;
    let source = format!("[{body}]");
    let mut rest = body;
    Ok(match placeholder(&mut rest) {
        Ok(placeholder) if rest.is_empty() => Segment::Placeholder {
            placeholder,
            source,
        },
        _ => Segment::Unrecognized(source),
    })
}

fn placeholder(input: &mut &str) -> ModalResult<Placeholder> {
    alt((
        terminated(agreement_slot, eof).map(Placeholder::Agreement),
        terminated(article_slot, eof).map(Placeholder::Article),
        terminated(entity_slot, eof).map(Placeholder::Entity),
    ))
    .parse_next(input)
}

fn entity(input: &mut &str) -> ModalResult<Entity> {
    alt(('X'.value(Entity::Subject), 'Y'.value(Entity::Object))).parse_next(input)
}

fn case_name(input: &mut &str) -> ModalResult<Case> {
    alt((
        "Nom".value(Case::Nominative),
        "Gen".value(Case::Genitive),
        "Acc".value(Case::Accusative),
        "Dat".value(Case::Dative),
        "Ess".value(Case::Essive),
        "Ins".value(Case::Instrumental),
    ))
    .parse_next(input)
}

fn gender_name(input: &mut &str) -> ModalResult<GrammaticalGender> {
    alt((
        "Masc".value(GrammaticalGender::Masc),
        "Fem".value(GrammaticalGender::Fem),
        "Neut".value(GrammaticalGender::Neut),
    ))
    .parse_next(input)
}

/// Parse `X`, `X.Gen`, `X.Masc.Nom`.
fn entity_slot(input: &mut &str) -> ModalResult<EntitySlot> {
    (
        entity,
        opt(preceded('.', gender_name)),
        opt(preceded('.', case_name)),
    )
        .map(|(entity, gender, case)| EntitySlot {
            entity,
            case,
            gender,
        })
        .parse_next(input)
}

/// Parse `DEF;X`, `PREPDEF;X`, `DEF.Gen;X`, `INDEF;Y`, `DEF;Y.Fem`.
fn article_slot(input: &mut &str) -> ModalResult<ArticleSlot> {
    let fused = opt("PREP").parse_next(input)?.is_some();
    let definiteness = alt((
        "DEF".value(Definiteness::Definite),
        "INDEF".value(Definiteness::Indefinite),
    ))
    .parse_next(input)?;
    let case = opt(preceded('.', case_name)).parse_next(input)?;
    ';'.parse_next(input)?;
    let entity = entity(input)?;
    let gender = opt(preceded('.', gender_name)).parse_next(input)?;
    Ok(ArticleSlot {
        entity,
        definiteness,
        fused,
        case,
        gender,
    })
}

fn agreement_slot(input: &mut &str) -> ModalResult<AgreementSlot> {
    alt((agreement_choice, agreement_inflect)).parse_next(input)
}

/// Parse `X-Gender` / `Y-Gender`.
fn gender_tag(input: &mut &str) -> ModalResult<Entity> {
    terminated(entity, "-Gender").parse_next(input)
}

/// Parse `lemma.X-Gender[.Pst|.Lgspec1]`; tags may appear in any order.
fn agreement_inflect(input: &mut &str) -> ModalResult<AgreementSlot> {
    let lemma: &str = take_till(1.., ['.', ';', '|']).parse_next(input)?;
    let tags: Vec<&str> = repeat(1.., preceded('.', take_till(1.., '.'))).parse_next(input)?;

    let mut entity = None;
    let mut feature = None;
    for tag in tags {
        let mut rest = tag;
        if let Ok(tagged) = terminated(gender_tag, eof).parse_next(&mut rest) {
            if entity.replace(tagged).is_some() {
                return Err(ErrMode::Backtrack(ContextError::new()));
            }
            continue;
        }
        let parsed = match tag {
            "Pst" => AgreementFeature::PastVerb,
            "Lgspec1" => AgreementFeature::LongAdjective,
            _ => return Err(ErrMode::Backtrack(ContextError::new())),
        };
        if feature.replace(parsed).is_some() {
            return Err(ErrMode::Backtrack(ContextError::new()));
        }
    }

    let Some(entity) = entity else {
        return Err(ErrMode::Backtrack(ContextError::new()));
    };
    Ok(AgreementSlot::Inflect {
        entity,
        lemma: lemma.to_string(),
        feature,
    })
}

/// Parse `formA;X-Gender|formB;X-Gender`. Tags may be omitted on one side.
fn agreement_choice(input: &mut &str) -> ModalResult<AgreementSlot> {
    let (gendered, first) = choice_option(input)?;
    '|'.parse_next(input)?;
    let (neuter, second) = choice_option(input)?;

    let entity = match (first, second) {
        (Some(a), Some(b)) if a != b => return Err(ErrMode::Backtrack(ContextError::new())),
        (Some(entity), _) | (None, Some(entity)) => entity,
        (None, None) => return Err(ErrMode::Backtrack(ContextError::new())),
    };
    Ok(AgreementSlot::Choice {
        entity,
        gendered: gendered.to_string(),
        neuter: neuter.to_string(),
    })
}

fn choice_option<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Option<Entity>)> {
    let form: &str = take_till(1.., [';', '|']).parse_next(input)?;
    let tag = opt(preceded(';', gender_tag)).parse_next(input)?;
    Ok((form.trim(), tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_placeholder(input: &str) -> Placeholder {
        let template = parse_template(input);
        let mut placeholders = template.placeholders();
        let (placeholder, _) = placeholders.next().expect("no placeholder");
        assert!(placeholders.next().is_none());
        placeholder.clone()
    }

    #[test]
    fn entity_slot_with_gender_and_case() {
        assert_eq!(
            only_placeholder("[X.Masc.Nom]"),
            Placeholder::Entity(EntitySlot {
                entity: Entity::Subject,
                case: Some(Case::Nominative),
                gender: Some(GrammaticalGender::Masc),
            })
        );
    }

    #[test]
    fn article_slot_with_fixed_gender() {
        assert_eq!(
            only_placeholder("[DEF;Y.Fem]"),
            Placeholder::Article(ArticleSlot {
                entity: Entity::Object,
                definiteness: Definiteness::Definite,
                fused: false,
                case: None,
                gender: Some(GrammaticalGender::Fem),
            })
        );
    }

    #[test]
    fn unknown_tags_are_not_agreement_slots() {
        let template = parse_template("[был.X-Gender.Fut]");
        assert_eq!(template.unrecognized().collect::<Vec<_>>(), ["[был.X-Gender.Fut]"]);
    }

    #[test]
    fn adjacent_literals_merge() {
        let template = parse_template("a [b ] c");
        assert_eq!(
            template.segments,
            [Segment::Literal("a ".to_string()), Segment::Unrecognized("[b ]".to_string()), Segment::Literal(" c".to_string())]
        );
    }
}
