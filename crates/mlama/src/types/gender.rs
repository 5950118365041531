use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gender metadata attached to an entity by the gender table.
///
/// `None` marks entities known to have no natural gender (places, things),
/// while `Unknown` marks entities that are missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    None,
    #[default]
    Unknown,
}

impl Gender {
    /// The grammatical gender implied directly by the metadata, if any.
    pub fn grammatical(self) -> Option<GrammaticalGender> {
        match self {
            Gender::Male => Some(GrammaticalGender::Masc),
            Gender::Female => Some(GrammaticalGender::Fem),
            Gender::None | Gender::Unknown => Option::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::None => "none",
            Gender::Unknown => "unknown",
        }
    }
}

/// Error returned when a gender string is not one of the recognized values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender '{0}', expected one of: male, female, none, unknown")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "none" => Ok(Gender::None),
            "unknown" | "" => Ok(Gender::Unknown),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Grammatical gender as used in feature bundles and article keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrammaticalGender {
    Masc,
    Fem,
    Neut,
}

impl GrammaticalGender {
    pub const ALL: [GrammaticalGender; 3] = [
        GrammaticalGender::Masc,
        GrammaticalGender::Fem,
        GrammaticalGender::Neut,
    ];

    /// UniMorph tag (`MASC`, `FEM`, `NEUT`).
    pub fn tag(self) -> &'static str {
        match self {
            GrammaticalGender::Masc => "MASC",
            GrammaticalGender::Fem => "FEM",
            GrammaticalGender::Neut => "NEUT",
        }
    }

    /// Spelling used inside template placeholders (`Masc`, `Fem`, `Neut`).
    pub fn template_name(self) -> &'static str {
        match self {
            GrammaticalGender::Masc => "Masc",
            GrammaticalGender::Fem => "Fem",
            GrammaticalGender::Neut => "Neut",
        }
    }
}

impl Display for GrammaticalGender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.tag())
    }
}

/// How the grammatical gender of an entity was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GenderOrigin {
    /// Taken from gender metadata (`male` / `female`).
    Known,
    /// Guessed from the ending of the label.
    Inferred,
    /// No gender available; the language default was used.
    Unspecified,
}

/// A grammatical gender together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedGender {
    pub gender: GrammaticalGender,
    pub origin: GenderOrigin,
}

impl ResolvedGender {
    pub fn known(gender: GrammaticalGender) -> Self {
        Self {
            gender,
            origin: GenderOrigin::Known,
        }
    }

    pub fn inferred(gender: GrammaticalGender) -> Self {
        Self {
            gender,
            origin: GenderOrigin::Inferred,
        }
    }

    pub fn unspecified(gender: GrammaticalGender) -> Self {
        Self {
            gender,
            origin: GenderOrigin::Unspecified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_values() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("none".parse::<Gender>().unwrap(), Gender::None);
        assert_eq!("".parse::<Gender>().unwrap(), Gender::Unknown);
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn only_natural_genders_map_directly() {
        assert_eq!(Gender::Male.grammatical(), Some(GrammaticalGender::Masc));
        assert_eq!(Gender::None.grammatical(), Option::None);
        assert_eq!(Gender::Unknown.grammatical(), Option::None);
    }
}
