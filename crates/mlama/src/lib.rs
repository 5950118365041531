pub mod article;
pub mod classify;
pub mod data;
pub mod error;
pub mod inflection;
pub mod probe;
pub mod prompt;
pub mod types;

pub use article::{ArticleKey, ArticleTable, Definiteness};
pub use error::{LoadError, RenderError};
pub use inflection::{InflectionCache, InflectionError, InflectionLookup, Inflector, UnimorphTable};
pub use prompt::{
    LanguageResources, Prompt, RenderOptions, RenderedInstance, lint_template, parse_template,
};
pub use types::{
    Case, Entity, Fact, FeatureBundle, Gender, GenderOrigin, GrammaticalGender, Number,
    ResolvedGender, SlotSet,
};
