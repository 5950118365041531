//! Slot bookkeeping shared by the inflecting language variants.

use super::template::{ArticleSlot, EntitySlot, Placeholder, Segment, Template};
use crate::error::RenderError;
use crate::types::Entity;

/// What goes into the entity's own slot.
#[derive(Debug, Clone, Copy)]
pub(super) enum Fill<'a> {
    /// The (possibly inflected) label itself.
    Label,
    /// `count` mask symbols joined by spaces.
    Mask { count: usize, symbol: &'a str },
}

impl Fill<'_> {
    pub(super) fn for_object(num_mask: usize, symbol: &str) -> Fill<'_> {
        if num_mask == 0 {
            Fill::Label
        } else {
            Fill::Mask {
                count: num_mask,
                symbol,
            }
        }
    }

    pub(super) fn text(self, label: &str) -> String {
        match self {
            Fill::Label => label.to_string(),
            Fill::Mask { count, symbol } => [symbol].repeat(count).join(" "),
        }
    }
}

/// Finds the single entity slot for `entity`.
///
/// Fails if there is none, if there are several, or if `accepts` rejects the
/// one found.
pub(super) fn entity_slot(
    template: &Template,
    entity: Entity,
    language: &str,
    accepts: impl Fn(&EntitySlot) -> bool,
) -> Result<EntitySlot, RenderError> {
    let found: Vec<(&EntitySlot, &str)> = template
        .placeholders()
        .filter_map(|(placeholder, source)| match placeholder {
            Placeholder::Entity(slot) if slot.entity == entity => Some((slot, source)),
            Placeholder::Entity(_) | Placeholder::Article(_) | Placeholder::Agreement(_) => None,
        })
        .collect();

    match found.as_slice() {
        [] => Err(RenderError::MissingPlaceholder {
            entity,
            language: language.to_string(),
        }),
        [(slot, source)] => {
            if accepts(slot) {
                Ok(**slot)
            } else {
                Err(RenderError::UnsupportedPlaceholder {
                    placeholder: (*source).to_string(),
                    language: language.to_string(),
                })
            }
        }
        _ => Err(RenderError::ConflictingPlaceholders {
            entity,
            placeholders: found.iter().map(|(_, source)| (*source).to_string()).collect(),
        }),
    }
}

/// Finds the article slot for `entity`, if any. Several are an error.
pub(super) fn article_slot(
    template: &Template,
    entity: Entity,
) -> Result<Option<ArticleSlot>, RenderError> {
    let found: Vec<(&ArticleSlot, &str)> = template
        .placeholders()
        .filter_map(|(placeholder, source)| match placeholder {
            Placeholder::Article(slot) if slot.entity == entity => Some((slot, source)),
            Placeholder::Entity(_) | Placeholder::Article(_) | Placeholder::Agreement(_) => None,
        })
        .collect();

    match found.as_slice() {
        [] => Ok(None),
        [(slot, _)] => Ok(Some(**slot)),
        _ => Err(RenderError::ConflictingPlaceholders {
            entity,
            placeholders: found.iter().map(|(_, source)| (*source).to_string()).collect(),
        }),
    }
}

/// Rebuilds the template text, replacing the placeholders `replace` returns a
/// value for and writing every other token back verbatim.
pub(super) fn substitute(
    template: &Template,
    mut replace: impl FnMut(&Placeholder, &str) -> Result<Option<String>, RenderError>,
) -> Result<String, RenderError> {
    let mut out = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) | Segment::Unrecognized(text) => out.push_str(text),
            Segment::Placeholder {
                placeholder,
                source,
            } => match replace(placeholder, source)? {
                Some(text) => out.push_str(&text),
                None => out.push_str(source),
            },
        }
    }
    Ok(out)
}

pub(super) fn unsupported(source: &str, language: &str) -> RenderError {
    RenderError::UnsupportedPlaceholder {
        placeholder: source.to_string(),
        language: language.to_string(),
    }
}
