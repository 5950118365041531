//! Integration tests for the dataset and resource loaders.

use std::io::Write;

use mlama::data::{
    EntityLabels, GenderTable, Portion, PromptTable, RawFact, parse_facts, read_facts,
    resolve_facts,
};
use mlama::probe::ProbeConfig;
use mlama::{ArticleTable, Gender, LoadError, UnimorphTable};
use tempfile::NamedTempFile;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn raw(sub_uri: &str, obj_uri: &str) -> RawFact {
    RawFact {
        sub_uri: sub_uri.to_string(),
        obj_uri: obj_uri.to_string(),
        predicate_id: Some("P19".to_string()),
        uuid: None,
        sub_label: None,
        obj_label: None,
    }
}

// =========================================================================
// Prompt Table
// =========================================================================

#[test]
fn prompt_table_loads_from_file() {
    let file = temp_file("pid\ten\tru\nP19\t[X] was born in [Y].\t[X] родился в [Y.Ess].\n");
    let table = PromptTable::load(file.path()).unwrap();
    assert_eq!(table.relations(), ["P19"]);
    assert_eq!(table.languages(), ["en", "ru"]);
    assert_eq!(table.template("P19", "ru"), Some("[X] родился в [Y.Ess]."));
    assert_eq!(table.template("P20", "ru"), None);
}

#[test]
fn prompt_table_keeps_commas_inside_templates() {
    let table = PromptTable::parse("pid\ten\nP31\t[X], a [Y], is here.\n").unwrap();
    assert_eq!(table.template("P31", "en"), Some("[X], a [Y], is here."));
}

#[test]
fn prompt_table_requires_pid_header() {
    let err = PromptTable::parse("relation\ten\nP19\t[X] [Y]\n").unwrap_err();
    assert_eq!(err.line(), Some(1));
}

#[test]
fn prompt_table_explains_comma_separated_files() {
    let err = PromptTable::parse("pid,en,el\nP19,\"[X] was born in [Y].\",\n").unwrap_err();
    assert_eq!(err.line(), Some(1));
    insta::assert_snapshot!(
        err.to_string(),
        @"<prompt table>:1: comma-separated header; convert the file to tab-separated first"
    );
}

#[test]
fn prompt_table_rejects_extra_cells() {
    let err = PromptTable::parse("pid\ten\nP19\t[X] [Y]\t[X] [Y]\n").unwrap_err();
    assert!(matches!(err, LoadError::Parse { line: 2, .. }));
}

// =========================================================================
// Entity Labels and Genders
// =========================================================================

#[test]
fn entity_labels_parse_language_tagged_cells() {
    let labels =
        EntityLabels::parse("Q1\t\"Berlin\"@en\t\"Βερολίνο\"@el\nQ2\t\"user@example\"@en\n")
            .unwrap();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels.label("Q1", "el"), Some("Βερολίνο"));
    assert_eq!(labels.label("Q2", "en"), Some("user@example"));
}

#[test]
fn entity_label_without_language_is_an_error() {
    let err = EntityLabels::parse("Q1\t\"Berlin\"@en\nQ2\tBerlin\n").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("no '@lang' suffix"));
}

#[test]
fn gender_table_defaults_to_unknown() {
    let file = temp_file("Q7186\tfemale\nQ1035\tmale\n");
    let genders = GenderTable::load(file.path()).unwrap();
    assert_eq!(genders.get("Q7186"), Gender::Female);
    assert_eq!(genders.get("Q42"), Gender::Unknown);
}

#[test]
fn gender_table_rejects_unknown_values() {
    let err = GenderTable::parse("Q1\tmasculine\n").unwrap_err();
    assert!(err.to_string().contains("unknown gender 'masculine'"));
}

#[test]
fn missing_file_reports_its_path() {
    let err = GenderTable::load("/nonexistent/genders.tsv").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.line(), None);
    assert_eq!(err.path().to_str(), Some("/nonexistent/genders.tsv"));
}

// =========================================================================
// Facts
// =========================================================================

#[test]
fn facts_are_read_as_json_lines() {
    let file = temp_file(concat!(
        r#"{"sub_uri": "Q1", "obj_uri": "Q2", "predicate_id": "P19", "uuid": "a"}"#,
        "\n\n",
        r#"{"sub_uri": "Q3", "obj_uri": "Q4", "obj_label": "Paris"}"#,
        "\n",
    ));
    let facts = read_facts(file.path()).unwrap();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].uuid.as_deref(), Some("a"));
    assert_eq!(facts[1].obj_label.as_deref(), Some("Paris"));
}

#[test]
fn malformed_fact_line_carries_its_line_number() {
    let err = parse_facts("{\"sub_uri\": \"Q1\", \"obj_uri\": \"Q2\"}\n{\"sub_uri\": 1}\n")
        .unwrap_err();
    assert!(matches!(err, LoadError::Json { line: 2, .. }));
}

#[test]
fn portion_filters_by_label_availability() {
    let mut labels = EntityLabels::default();
    labels.insert("Q1", "el", "Άρης");
    labels.insert("Q2", "el", "Αθήνα");
    labels.insert("Q3", "en", "Smyrna");
    labels.insert("Q3", "el", "Σμύρνη");
    labels.insert("Q4", "en", "Ankara");
    let genders = GenderTable::default();
    let facts = [raw("Q1", "Q2"), raw("Q3", "Q4")];

    let trans = ProbeConfig::builder().portion(Portion::Trans).build();
    let (kept, stats) = resolve_facts("P19", &facts, &labels, &genders, "el", &trans);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].obj_label, "Αθήνα");
    assert_eq!(stats.skipped_portion, 1);

    let non = ProbeConfig::builder().portion(Portion::Non).build();
    let (kept, _) = resolve_facts("P19", &facts, &labels, &genders, "el", &non);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].sub_label, "Σμύρνη");
    assert_eq!(kept[0].obj_label, "Ankara");
}

#[test]
fn same_language_fallback_applies_to_both_labels() {
    let mut labels = EntityLabels::default();
    labels.insert("Q3", "en", "Smyrna");
    labels.insert("Q3", "el", "Σμύρνη");
    labels.insert("Q4", "en", "Ankara");
    let config = ProbeConfig::builder().sub_obj_same_lang(true).build();

    let (kept, _) = resolve_facts(
        "P19",
        &[raw("Q3", "Q4")],
        &labels,
        &GenderTable::default(),
        "el",
        &config,
    );
    assert_eq!(kept[0].sub_label, "Smyrna");
    assert_eq!(kept[0].obj_label, "Ankara");
}

#[test]
fn facts_without_any_label_are_dropped() {
    let mut labels = EntityLabels::default();
    labels.insert("Q1", "ru", "Пушкин");
    let mut genders = GenderTable::default();
    genders.insert("Q1", Gender::Male);

    let mut with_dataset_label = raw("Q1", "Q9");
    with_dataset_label.obj_label = Some("Moscow".to_string());
    let facts = [raw("Q1", "Q2"), with_dataset_label];

    let (kept, stats) = resolve_facts(
        "P19",
        &facts,
        &labels,
        &genders,
        "ru",
        &ProbeConfig::default(),
    );
    assert_eq!(stats.missing_label, 1);
    assert_eq!(stats.kept, 1);
    assert_eq!(kept[0].obj_label, "Moscow");
    assert_eq!(kept[0].sub_gender, Gender::Male);
    assert_eq!(kept[0].obj_gender, Gender::Unknown);
}

// =========================================================================
// Linguistic Resources
// =========================================================================

#[test]
fn unimorph_table_loads_from_file() {
    let file = temp_file("# comment\nМосква\tМосквы\tN;GEN;SG\n\nМосква\tМоскве\tN;ESS;SG\n");
    let mut table = UnimorphTable::new();
    assert_eq!(table.load("rus", file.path()).unwrap(), 2);
    assert_eq!(table.lemma_count("rus"), 1);
    assert_eq!(table.lemma_count("ell2"), 0);
}

#[test]
fn unimorph_line_needs_three_fields() {
    let mut table = UnimorphTable::new();
    let err = table.load_str("rus", "Москва\tМосквы\n").unwrap_err();
    assert!(matches!(err, LoadError::Parse { line: 1, .. }));
}

#[test]
fn article_table_loads_from_file() {
    let file = temp_file("ο\tART;DEF;MASC;SG;NOM\nτην\tART;DEF;FEM;SG;ACC\n");
    let table = ArticleTable::load("el", file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("ART;DEF;FEM;SG;ACC"), Some("την"));
}

#[test]
fn article_keys_must_start_with_art() {
    let err = ArticleTable::parse("el", "ο\tDEF;MASC;SG;NOM\n").unwrap_err();
    assert_eq!(err.line(), Some(1));
}

#[test]
fn probe_config_reads_json_file() {
    let file = temp_file(r#"{ "max_mask": 2, "restricted_vocab": [5, 7], "normalize": true }"#);
    let config = ProbeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.max_mask, 2);
    assert_eq!(config.restricted_vocab, [5, 7]);
    assert!(config.normalize);
    assert_eq!(config.fallback_language, "en");
}

#[test]
fn config_rejects_zero_max_mask() {
    let err = ProbeConfig::from_json_str(r#"{ "max_mask": 0 }"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { line: 1, .. }));
    assert!(err.to_string().contains("max_mask must be at least 1"));
}
