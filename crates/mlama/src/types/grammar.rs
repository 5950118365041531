use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];

    /// UniMorph tag (`SG`, `PL`).
    pub fn tag(self) -> &'static str {
        match self {
            Number::Singular => "SG",
            Number::Plural => "PL",
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.tag())
    }
}

/// Grammatical case requested by a template slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Case {
    Nominative,
    Genitive,
    Accusative,
    Dative,
    Essive,
    Instrumental,
}

impl Case {
    pub const ALL: [Case; 6] = [
        Case::Nominative,
        Case::Genitive,
        Case::Accusative,
        Case::Dative,
        Case::Essive,
        Case::Instrumental,
    ];

    /// UniMorph tag (`NOM`, `GEN`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Case::Nominative => "NOM",
            Case::Genitive => "GEN",
            Case::Accusative => "ACC",
            Case::Dative => "DAT",
            Case::Essive => "ESS",
            Case::Instrumental => "INS",
        }
    }

    /// Spelling used inside template placeholders (`Nom`, `Gen`, ...).
    pub fn template_name(self) -> &'static str {
        match self {
            Case::Nominative => "Nom",
            Case::Genitive => "Gen",
            Case::Accusative => "Acc",
            Case::Dative => "Dat",
            Case::Essive => "Ess",
            Case::Instrumental => "Ins",
        }
    }
}

impl Display for Case {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.tag())
    }
}

/// The two entity slots of a relational template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    /// The subject, written `X` in templates.
    Subject,
    /// The object, written `Y` in templates.
    Object,
}

impl Entity {
    pub fn symbol(self) -> char {
        match self {
            Entity::Subject => 'X',
            Entity::Object => 'Y',
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.symbol())
    }
}

/// A set of entity slots, used to disable inflection per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SlotSet {
    subject: bool,
    object: bool,
}

impl SlotSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            subject: true,
            object: true,
        }
    }

    pub fn only(entity: Entity) -> Self {
        Self::empty().with(entity)
    }

    pub fn with(mut self, entity: Entity) -> Self {
        match entity {
            Entity::Subject => self.subject = true,
            Entity::Object => self.object = true,
        }
        self
    }

    pub fn contains(self, entity: Entity) -> bool {
        match entity {
            Entity::Subject => self.subject,
            Entity::Object => self.object,
        }
    }

    pub fn is_empty(self) -> bool {
        !self.subject && !self.object
    }
}

/// Error returned when a slot set string names something other than `x`/`y`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity slot '{0}', expected 'x' or 'y'")]
pub struct UnknownSlot(pub char);

impl FromStr for SlotSet {
    type Err = UnknownSlot;

    /// Parses strings such as `"x"`, `"y"`, `"xy"` or `"x,y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = SlotSet::empty();
        for c in s.chars() {
            match c.to_ascii_lowercase() {
                'x' => set = set.with(Entity::Subject),
                'y' => set = set.with(Entity::Object),
                ',' | ' ' => {}
                other => return Err(UnknownSlot(other)),
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_set_parses_combined_forms() {
        assert_eq!("xy".parse::<SlotSet>().unwrap(), SlotSet::all());
        assert_eq!("x, y".parse::<SlotSet>().unwrap(), SlotSet::all());
        assert_eq!("Y".parse::<SlotSet>().unwrap(), SlotSet::only(Entity::Object));
        assert_eq!("".parse::<SlotSet>().unwrap(), SlotSet::empty());
        assert_eq!("z".parse::<SlotSet>(), Err(UnknownSlot('z')));
    }
}
