use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::article::ArticleTable;
use crate::inflection::InflectionLookup;
use crate::types::SlotSet;

/// Per-run switches that change how entities are rendered.
///
/// # Example
///
/// ```
/// use mlama::{RenderOptions, SlotSet};
/// use mlama::types::Entity;
///
/// let options = RenderOptions::builder()
///     .disable_inflection(SlotSet::only(Entity::Object))
///     .disable_article(true)
///     .build();
/// assert!(options.disable_inflection.contains(Entity::Object));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Entity slots whose labels (and agreeing words) are never inflected.
    #[builder(default)]
    pub disable_inflection: SlotSet,
    /// Render every article slot as an empty string.
    #[builder(default)]
    pub disable_article: bool,
}

/// Linguistic resources a language variant renders with.
///
/// Both are loaded once and shared read-only; cloning shares the inflection
/// cache.
#[derive(Debug, Clone, Default, Builder)]
pub struct LanguageResources {
    #[builder(default)]
    pub inflection: InflectionLookup,
    /// Article table; Greek falls back to [`ArticleTable::greek`].
    pub articles: Option<ArticleTable>,
}
