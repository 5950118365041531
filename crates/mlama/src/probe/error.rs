use thiserror::Error;

use crate::error::RenderError;

/// Failure reported by a [`MaskedLanguageModel`](super::MaskedLanguageModel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model inference failed: {message}")]
pub struct ModelError {
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that abort probing a relation.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model returned no scores for a non-empty batch.
    #[error("model returned no scores for a batch of {sequences} sequences")]
    EmptyBatch { sequences: usize },

    /// Model output does not line up with its input.
    #[error("model output mismatch: expected {expected} {what}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The configuration cannot drive a run.
    #[error("invalid probe configuration: {message}")]
    InvalidConfig { message: String },

    /// A rendered input has no mask token after tokenization.
    #[error("no mask token in model input '{input}'")]
    MissingMask { input: String },
}
