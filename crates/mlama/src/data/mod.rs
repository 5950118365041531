//! Loaders for the probing dataset: entity labels, gender metadata, prompt
//! templates and relation facts.

mod entities;
mod facts;
mod gender;
mod prompts;

pub use entities::EntityLabels;
pub use facts::{FactStats, Portion, RawFact, UnknownPortion, parse_facts, read_facts, resolve_facts};
pub use gender::GenderTable;
pub use prompts::PromptTable;
