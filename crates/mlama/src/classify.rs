//! Surface-form heuristics applied to entity labels before inflection.
//!
//! Two questions are answered here without any lexicon:
//! - should a label be left uninflected (foreign names, acronyms, loanwords)?
//! - which grammatical gender does a label most likely carry?

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::GrammaticalGender;

/// Code point blocks assigned to the Latin script.
const LATIN_RANGES: &[(char, char)] = &[
    ('A', 'Z'),
    ('a', 'z'),
    ('\u{00AA}', '\u{00AA}'),
    ('\u{00BA}', '\u{00BA}'),
    ('\u{00C0}', '\u{00D6}'),
    ('\u{00D8}', '\u{00F6}'),
    ('\u{00F8}', '\u{024F}'),
    ('\u{0250}', '\u{02AF}'),
    ('\u{1D00}', '\u{1D25}'),
    ('\u{1E00}', '\u{1EFF}'),
    ('\u{2C60}', '\u{2C7F}'),
    ('\u{A720}', '\u{A7FF}'),
    ('\u{AB30}', '\u{AB6F}'),
    ('\u{FB00}', '\u{FB06}'),
    ('\u{FF21}', '\u{FF3A}'),
    ('\u{FF41}', '\u{FF5A}'),
];

/// Returns true if `c` is a letter of the Latin script.
pub fn is_latin_letter(c: char) -> bool {
    c.is_alphabetic()
        && LATIN_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&c))
}

/// Returns true if at least one letter of `label` is Latin.
pub fn some_latin_letters(label: &str) -> bool {
    label.chars().any(is_latin_letter)
}

/// Returns true if `label` has cased letters and all of them are uppercase.
///
/// Digits and punctuation are ignored, so `"NASA-2"` counts as uppercase while
/// `"2024"` does not.
pub fn is_all_uppercase(label: &str) -> bool {
    let mut has_upper = false;
    for c in label.chars() {
        if c.is_lowercase() {
            return false;
        }
        has_upper |= c.is_uppercase();
    }
    has_upper
}

/// The last user-perceived character of `label`, NFC-normalized.
pub fn last_grapheme(label: &str) -> Option<String> {
    label
        .trim_end()
        .graphemes(true)
        .next_back()
        .map(|g| g.nfc().collect())
}

/// Decides whether a label must be inserted verbatim instead of inflected.
///
/// True when the label contains a Latin letter, is entirely uppercase, or
/// ends in one of `suffixes` (consonant endings that mark foreign stems).
/// An empty label is never inflected.
pub fn should_skip_inflection(label: &str, suffixes: &[&str]) -> bool {
    if label.trim().is_empty() {
        return true;
    }
    if some_latin_letters(label) || is_all_uppercase(label) {
        return true;
    }
    last_grapheme(label).is_some_and(|last| suffixes.contains(&last.as_str()))
}

/// Trailing-character rules used to guess grammatical gender.
#[derive(Debug, Clone, Copy)]
pub struct EndingRules {
    /// Checked in order; the first matching suffix wins.
    pub endings: &'static [(&'static str, GrammaticalGender)],
    /// Gender used when no ending matches.
    pub fallback: GrammaticalGender,
}

/// Russian endings: `-а`/`-я` feminine, `-о`/`-е`/`-ё` neuter, `-й` and
/// consonants masculine.
pub const RUSSIAN_ENDINGS: EndingRules = EndingRules {
    endings: &[
        ("а", GrammaticalGender::Fem),
        ("я", GrammaticalGender::Fem),
        ("о", GrammaticalGender::Neut),
        ("е", GrammaticalGender::Neut),
        ("ё", GrammaticalGender::Neut),
        ("й", GrammaticalGender::Masc),
        ("б", GrammaticalGender::Masc),
        ("в", GrammaticalGender::Masc),
        ("г", GrammaticalGender::Masc),
        ("д", GrammaticalGender::Masc),
        ("ж", GrammaticalGender::Masc),
        ("з", GrammaticalGender::Masc),
        ("к", GrammaticalGender::Masc),
        ("л", GrammaticalGender::Masc),
        ("м", GrammaticalGender::Masc),
        ("н", GrammaticalGender::Masc),
        ("п", GrammaticalGender::Masc),
        ("р", GrammaticalGender::Masc),
        ("с", GrammaticalGender::Masc),
        ("т", GrammaticalGender::Masc),
        ("ф", GrammaticalGender::Masc),
        ("х", GrammaticalGender::Masc),
        ("ц", GrammaticalGender::Masc),
        ("ч", GrammaticalGender::Masc),
        ("ш", GrammaticalGender::Masc),
        ("щ", GrammaticalGender::Masc),
    ],
    fallback: GrammaticalGender::Masc,
};

/// Greek noun endings. Longer suffixes come first so that "-μα" wins over
/// "-α". Labels in stressed "-ά" are neuter plurals and take the fallback.
pub const GREEK_ENDINGS: EndingRules = EndingRules {
    endings: &[
        ("ος", GrammaticalGender::Masc),
        ("ός", GrammaticalGender::Masc),
        ("ης", GrammaticalGender::Masc),
        ("ής", GrammaticalGender::Masc),
        ("ας", GrammaticalGender::Masc),
        ("άς", GrammaticalGender::Masc),
        ("μα", GrammaticalGender::Neut),
        ("ον", GrammaticalGender::Neut),
        ("όν", GrammaticalGender::Neut),
        ("α", GrammaticalGender::Fem),
        ("η", GrammaticalGender::Fem),
        ("ή", GrammaticalGender::Fem),
        ("ο", GrammaticalGender::Neut),
        ("ό", GrammaticalGender::Neut),
        ("ι", GrammaticalGender::Neut),
        ("ί", GrammaticalGender::Neut),
    ],
    fallback: GrammaticalGender::Neut,
};

/// Greek consonant endings marking foreign stems that are left uninflected.
pub const GREEK_SKIP_SUFFIXES: &[&str] = &[
    "β", "γ", "δ", "ζ", "κ", "λ", "μ", "ν", "ξ", "π", "ρ", "τ", "φ", "χ", "ψ",
];

/// Guesses the grammatical gender of `label` from its ending.
///
/// The label is trimmed, NFC-normalized and lowercased before matching.
pub fn infer_gender_from_ending(label: &str, rules: &EndingRules) -> GrammaticalGender {
    let normalized: String = label.trim().nfc().collect::<String>().to_lowercase();
    rules
        .endings
        .iter()
        .find(|(suffix, _)| normalized.ends_with(suffix))
        .map_or(rules.fallback, |&(_, gender)| gender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_detection_covers_accented_letters() {
        assert!(is_latin_letter('é'));
        assert!(is_latin_letter('Ł'));
        assert!(!is_latin_letter('α'));
        assert!(!is_latin_letter('ж'));
        assert!(!is_latin_letter('1'));
    }

    #[test]
    fn uppercase_requires_a_cased_letter() {
        assert!(is_all_uppercase("NASA"));
        assert!(is_all_uppercase("ΟΗΕ"));
        assert!(!is_all_uppercase("2024"));
        assert!(!is_all_uppercase("Nasa"));
    }

    #[test]
    fn last_grapheme_keeps_combining_marks() {
        assert_eq!(last_grapheme("Αθηνά").as_deref(), Some("ά"));
        assert_eq!(last_grapheme("Αθηνα\u{0301}").as_deref(), Some("ά"));
        assert_eq!(last_grapheme(""), None);
    }
}
