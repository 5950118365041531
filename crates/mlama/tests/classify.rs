//! Tests for the label heuristics that steer inflection.

use mlama::GrammaticalGender;
use mlama::classify::{
    GREEK_ENDINGS, GREEK_SKIP_SUFFIXES, RUSSIAN_ENDINGS, infer_gender_from_ending,
    last_grapheme, should_skip_inflection, some_latin_letters,
};

#[test]
fn latin_detection_covers_accented_letters() {
    assert!(some_latin_letters("Zürich"));
    assert!(some_latin_letters("Łódź"));
    assert!(!some_latin_letters("Αθήνα"));
    assert!(!some_latin_letters("Москва 2"));
}

#[test]
fn skip_inflection_for_foreign_and_acronym_labels() {
    assert!(should_skip_inflection("Microsoft", &[]));
    assert!(should_skip_inflection("ΝΑΤΟ", &[]));
    assert!(should_skip_inflection("", &[]));
    assert!(!should_skip_inflection("Москва", &[]));
}

#[test]
fn greek_consonant_endings_mark_foreign_stems() {
    assert!(!should_skip_inflection("Μπαγκλαντές", GREEK_SKIP_SUFFIXES));
    assert!(should_skip_inflection("Ισραήλ", GREEK_SKIP_SUFFIXES));
    assert!(!should_skip_inflection("Λονδίνο", GREEK_SKIP_SUFFIXES));
}

#[test]
fn last_grapheme_keeps_combining_marks() {
    assert_eq!(last_grapheme("Αθηνά").as_deref(), Some("ά"));
    assert_eq!(last_grapheme("Αθηνα\u{301}").as_deref(), Some("ά"));
    assert_eq!(last_grapheme("  "), None);
}

#[test]
fn russian_gender_from_endings() {
    assert_eq!(infer_gender_from_ending("Москва", &RUSSIAN_ENDINGS), GrammaticalGender::Fem);
    assert_eq!(infer_gender_from_ending("Россия", &RUSSIAN_ENDINGS), GrammaticalGender::Fem);
    assert_eq!(infer_gender_from_ending("Сочи", &RUSSIAN_ENDINGS), GrammaticalGender::Masc);
    assert_eq!(infer_gender_from_ending("Токио ", &RUSSIAN_ENDINGS), GrammaticalGender::Neut);
    assert_eq!(infer_gender_from_ending("Китай", &RUSSIAN_ENDINGS), GrammaticalGender::Masc);
}

#[test]
fn greek_gender_prefers_longer_endings() {
    assert_eq!(infer_gender_from_ending("Πρόγραμμα", &GREEK_ENDINGS), GrammaticalGender::Neut);
    assert_eq!(infer_gender_from_ending("Αθήνα", &GREEK_ENDINGS), GrammaticalGender::Fem);
    assert_eq!(infer_gender_from_ending("Πειραιάς", &GREEK_ENDINGS), GrammaticalGender::Masc);
    assert_eq!(infer_gender_from_ending("Λονδίνο", &GREEK_ENDINGS), GrammaticalGender::Neut);
    assert_eq!(infer_gender_from_ending("Ισραήλ", &GREEK_ENDINGS), GrammaticalGender::Neut);
}

#[test]
fn greek_stressed_alpha_agrees_with_neuter_plural_reading() {
    assert_eq!(infer_gender_from_ending("Ελληνικά", &GREEK_ENDINGS), GrammaticalGender::Neut);
    assert_eq!(infer_gender_from_ending("ΕΛΛΗΝΙΚΆ", &GREEK_ENDINGS), GrammaticalGender::Neut);
    assert_eq!(infer_gender_from_ending("Μαρία", &GREEK_ENDINGS), GrammaticalGender::Fem);
}
