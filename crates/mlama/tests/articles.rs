//! Tests for article tables and their coverage reports.

use mlama::{ArticleKey, ArticleTable, Case, Definiteness, GrammaticalGender, Number, RenderError};

fn key(definiteness: Definiteness, fused: bool, gender: GrammaticalGender, case: Case) -> ArticleKey {
    ArticleKey {
        definiteness,
        fused,
        gender,
        number: Number::Singular,
        case: Some(case),
    }
}

#[test]
fn greek_table_resolves_keys() {
    let table = ArticleTable::greek();
    let masc_acc = key(Definiteness::Definite, false, GrammaticalGender::Masc, Case::Accusative);
    assert_eq!(table.resolve(&masc_acc).unwrap(), "τον");
    let fem_gen = key(Definiteness::Indefinite, false, GrammaticalGender::Fem, Case::Genitive);
    assert_eq!(table.resolve(&fem_gen).unwrap(), "μίας");
    let neut_acc = key(Definiteness::Definite, true, GrammaticalGender::Neut, Case::Accusative);
    assert_eq!(table.resolve(&neut_acc).unwrap(), "στο");
}

#[test]
fn unresolved_key_names_the_language() {
    let table = ArticleTable::new("de");
    let masc_nom = key(Definiteness::Definite, false, GrammaticalGender::Masc, Case::Nominative);
    let err = table.resolve(&masc_nom).unwrap_err();
    assert!(matches!(err, RenderError::MissingArticleForm { .. }));
    assert_eq!(
        err.to_string(),
        "no article form for 'ART;DEF;MASC;SG;NOM' in the 'de' article table"
    );
}

#[test]
fn later_lines_override_earlier_ones() {
    let table = ArticleTable::parse(
        "el",
        "# definite\nο\tART;DEF;MASC;SG;NOM\nΟ\tART;DEF;MASC;SG;NOM\n",
    )
    .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("ART;DEF;MASC;SG;NOM"), Some("Ο"));
}

#[test]
fn greek_coverage_reports_gaps() {
    let table = ArticleTable::greek();
    let coverage = table.coverage(&[Case::Nominative, Case::Genitive, Case::Accusative]);
    assert_eq!(coverage.len(), 72);

    let missing: Vec<String> = coverage
        .iter()
        .filter(|entry| entry.form.is_none())
        .map(|entry| entry.key.to_string())
        .collect();
    assert_eq!(missing.len(), 33);
    assert!(missing.contains(&"ART;PREPDEF;MASC;SG;NOM".to_string()));
    assert!(missing.contains(&"ART;INDEF;FEM;PL;ACC".to_string()));
    assert!(!missing.contains(&"ART;PREPDEF;FEM;PL;ACC".to_string()));
}

#[test]
fn coverage_order_is_stable() {
    let table = ArticleTable::greek();
    let first: Vec<String> = table
        .coverage(&[Case::Nominative])
        .iter()
        .take(4)
        .map(|entry| format!("{} {}", entry.key, entry.form.unwrap_or("-")))
        .collect();
    insta::assert_snapshot!(first.join("\n"), @r"
    ART;DEF;MASC;SG;NOM ο
    ART;DEF;MASC;PL;NOM οι
    ART;DEF;FEM;SG;NOM η
    ART;DEF;FEM;PL;NOM οι
    ");
}
