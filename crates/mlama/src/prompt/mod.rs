//! Cloze prompt rendering.
//!
//! A [`Prompt`] turns a relation template such as `"[X] was born in [Y]."`
//! into model input in two steps: [`Prompt::fill_x`] inserts the subject,
//! then [`Prompt::fill_y`] inserts either mask tokens or the object label.
//! Languages with rich morphology get their own variant that inflects labels,
//! picks agreeing articles and makes verbs and adjectives agree in gender.

mod default;
mod engine;
mod greek;
mod lint;
mod normalize;
mod options;
mod russian;
mod template;

use serde::Serialize;
use tracing::trace;

pub use default::DefaultPrompt;
pub use greek::GreekPrompt;
pub use lint::{TemplateWarning, known_placeholders, lint_template, lint_template_with_articles};
pub use normalize::normalize_greek;
pub use options::{LanguageResources, RenderOptions};
pub use russian::RussianPrompt;
pub use template::{
    AgreementFeature, AgreementSlot, ArticleSlot, EntitySlot, Placeholder, Segment, Template,
    parse_template,
};

use self::engine::Fill;
use crate::error::RenderError;
use crate::types::{Entity, Gender};

/// A rendered template together with the label form that was inserted.
///
/// For the object, `label` is the gold answer the model must reproduce: the
/// inflected form when the slot asked for a case, not the dictionary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedInstance {
    pub text: String,
    pub label: String,
}

/// A language-specific renderer, chosen once per run from the language code.
///
/// # Example
///
/// ```
/// use mlama::{Gender, LanguageResources, Prompt, RenderOptions};
///
/// let prompt = Prompt::from_lang("en", RenderOptions::default(), LanguageResources::default());
/// let with_subject = prompt
///     .fill_x("[X] was born in [Y].", "Q7186", "Marie Curie", Gender::Female)
///     .unwrap();
/// let rendered = prompt
///     .fill_y(&with_subject.text, "Q270", "Warsaw", Gender::None, 1, "[MASK]")
///     .unwrap();
///
/// assert_eq!(rendered.text, "Marie Curie was born in [MASK].");
/// assert_eq!(rendered.label, "Warsaw");
/// ```
#[derive(Debug, Clone)]
pub enum Prompt {
    Default(DefaultPrompt),
    Greek(GreekPrompt),
    Russian(RussianPrompt),
}

impl Prompt {
    /// Picks the renderer for `lang`. Languages without a dedicated variant
    /// use plain substitution.
    pub fn from_lang(lang: &str, options: RenderOptions, resources: LanguageResources) -> Self {
        match lang {
            "el" => Prompt::Greek(GreekPrompt::new(options, resources)),
            "ru" => Prompt::Russian(RussianPrompt::new(options, resources.inflection)),
            _ => Prompt::Default(DefaultPrompt::new(lang)),
        }
    }

    /// Code under which the inflection resource for `lang` is keyed, if the
    /// language inflects at all.
    pub fn inflection_language(lang: &str) -> Option<&'static str> {
        match lang {
            "el" => Some(GreekPrompt::INFLECTION_LANGUAGE),
            "ru" => Some(RussianPrompt::INFLECTION_LANGUAGE),
            _ => None,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            Prompt::Default(prompt) => prompt.language(),
            Prompt::Greek(_) => "el",
            Prompt::Russian(_) => "ru",
        }
    }

    /// Inserts the subject.
    pub fn fill_x(
        &self,
        template: &str,
        uri: &str,
        label: &str,
        gender: Gender,
    ) -> Result<RenderedInstance, RenderError> {
        trace!(uri, label, %gender, "filling subject");
        match self {
            Prompt::Default(prompt) => Ok(prompt.fill_x(template, label)),
            Prompt::Greek(prompt) => {
                prompt.fill(&parse_template(template), Entity::Subject, label, gender, Fill::Label)
            }
            Prompt::Russian(prompt) => {
                prompt.fill(&parse_template(template), Entity::Subject, label, gender, Fill::Label)
            }
        }
    }

    /// Inserts the object as `num_mask` mask symbols joined by spaces, or as
    /// the label itself when `num_mask` is zero.
    ///
    /// The returned label is the gold form predictions are scored against.
    pub fn fill_y(
        &self,
        template: &str,
        uri: &str,
        label: &str,
        gender: Gender,
        num_mask: usize,
        mask_symbol: &str,
    ) -> Result<RenderedInstance, RenderError> {
        trace!(uri, label, %gender, num_mask, "filling object");
        let fill = Fill::for_object(num_mask, mask_symbol);
        match self {
            Prompt::Default(prompt) => Ok(prompt.fill_y(template, label, num_mask, mask_symbol)),
            Prompt::Greek(prompt) => {
                prompt.fill(&parse_template(template), Entity::Object, label, gender, fill)
            }
            Prompt::Russian(prompt) => {
                prompt.fill(&parse_template(template), Entity::Object, label, gender, fill)
            }
        }
    }

    /// Model-facing normalization of rendered text. Only Greek changes
    /// anything: accents are stripped and text lowercased.
    pub fn normalize(&self, text: &str, mask_symbol: &str) -> String {
        match self {
            Prompt::Greek(prompt) => prompt.normalize(text, mask_symbol),
            Prompt::Default(_) | Prompt::Russian(_) => text.to_string(),
        }
    }
}
