//! Probing masked language models with rendered cloze prompts.
//!
//! The model and its tokenizer are external: implement [`Tokenizer`] and
//! [`MaskedLanguageModel`] over whatever inference stack is available and hand
//! them to a [`Prober`].

mod config;
mod driver;
mod error;
mod model;
mod score;
mod search;

pub use config::ProbeConfig;
pub use driver::{
    EnsembleReport, FactOutcome, ProbeSummary, Prober, RelationFailure, RelationJob,
    RelationReport, SkipCounts,
};
pub use error::{ModelError, ProbeError};
pub use model::{MaskedLanguageModel, PaddedBatch, Tokenizer};
pub use score::{Accuracy, exact_match, length_match};
pub use search::{
    MaskCandidate, PositionPrediction, VocabMask, choose_best, mean_log_prob,
    restrict_and_argmax, select_mask_count,
};
