mod fact;
mod features;
mod gender;
mod grammar;

pub use fact::Fact;
pub use features::{FeatureBundle, PartOfSpeech, Tense};
pub use gender::{Gender, GenderOrigin, GrammaticalGender, ResolvedGender, UnknownGender};
pub use grammar::{Case, Entity, Number, SlotSet, UnknownSlot};
