use thiserror::Error;

/// Errors reported by an inflection resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflectionError {
    /// The lemma does not appear in the resource at all.
    #[error("lemma '{lemma}' is unknown to the '{language}' inflection resource")]
    UnknownLemma { lemma: String, language: String },

    /// The lemma is known but has no form for the requested features.
    #[error("no '{features}' form of '{lemma}' in the '{language}' inflection resource")]
    MissingForm {
        lemma: String,
        features: String,
        language: String,
    },

    /// The resource answered with an empty candidate list.
    #[error("inflection resource returned no candidates for '{lemma}' ({features}, {language})")]
    EmptyForms {
        lemma: String,
        features: String,
        language: String,
    },

    /// The resource itself failed (service unavailable, bad response, ...).
    #[error("inflection resource failed: {message}")]
    Resource { message: String },
}
