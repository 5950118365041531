//! Tests for static template checks.

use mlama::prompt::{TemplateWarning, known_placeholders, lint_template_with_articles};
use mlama::{ArticleTable, lint_template};
use mlama::types::Entity;

fn messages(template: &str, language: &str) -> String {
    lint_template(template, language)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// =========================================================================
// Clean Templates
// =========================================================================

#[test]
fn clean_templates_have_no_warnings() {
    assert!(lint_template("[X] was born in [Y].", "en").is_empty());
    assert!(lint_template("[DEF;X] [X] γεννήθηκε [PREPDEF;Y] [Y.Acc].", "el").is_empty());
    assert!(lint_template("[X] [родиться.X-Gender.Pst] в [Y.Ess].", "ru").is_empty());
}

#[test]
fn every_known_placeholder_is_supported() {
    for language in ["en", "el", "ru"] {
        for placeholder in known_placeholders(language) {
            let unsupported: Vec<_> = lint_template(placeholder, language)
                .into_iter()
                .filter(|warning| {
                    matches!(
                        warning,
                        TemplateWarning::UnknownPlaceholder { .. }
                            | TemplateWarning::UnsupportedPlaceholder { .. }
                    )
                })
                .collect();
            assert!(unsupported.is_empty(), "{language} {placeholder}: {unsupported:?}");
        }
    }
}

// =========================================================================
// Problems
// =========================================================================

#[test]
fn typo_gets_suggestions() {
    let warnings = lint_template("[X] lives in [Yy].", "en");
    assert_eq!(
        warnings[0],
        TemplateWarning::UnknownPlaceholder {
            token: "[Yy]".to_string(),
            suggestions: vec!["[Y]".to_string(), "[X]".to_string()],
        }
    );
    assert_eq!(
        warnings[1],
        TemplateWarning::MissingSlot {
            entity: Entity::Object
        }
    );
}

#[test]
fn case_slots_are_unsupported_without_inflection() {
    let warnings = lint_template("[X] was born in [Y.Gen].", "en");
    assert_eq!(
        warnings,
        [TemplateWarning::UnsupportedPlaceholder {
            token: "[Y.Gen]".to_string(),
            language: "en".to_string(),
        }]
    );
}

#[test]
fn repeated_slots_only_conflict_when_inflecting() {
    assert!(lint_template("[X] and [X] in [Y]", "en").is_empty());
    assert_eq!(
        messages("[X] and [X.Gen] in [Y]", "el"),
        "conflicting slots for [X]: [X], [X.Gen]"
    );
}

#[test]
fn language_specific_slots() {
    assert_eq!(
        messages("[DEF;X] [X] [Y]", "ru"),
        "placeholder '[DEF;X]' is not supported for language 'ru'"
    );
    assert_eq!(
        messages("[X] [был.X-Gender.Pst] [Y.Ess]", "el"),
        "placeholder '[был.X-Gender.Pst]' is not supported for language 'el'\n\
         placeholder '[Y.Ess]' is not supported for language 'el'"
    );
    assert_eq!(
        messages("[X.Acc] [Y.Acc]", "ru"),
        "placeholder '[X.Acc]' is not supported for language 'ru'"
    );
}

#[test]
fn greek_articles_without_table_forms_are_flagged() {
    assert_eq!(
        messages("[X] ζει [PREPINDEF;Y] [Y.Acc].", "el"),
        "article '[PREPINDEF;Y]' has no form in the 'el' article table"
    );
    assert_eq!(
        messages("[PREPDEF;X] [X] [Y]", "el"),
        "article '[PREPDEF;X]' has no form in the 'el' article table"
    );
    assert_eq!(
        messages("[X] [INDEF;Y.Fem] [Y]", "el"),
        "article '[INDEF;Y.Fem]' has no form in the 'el' article table"
    );
}

#[test]
fn greek_articles_with_some_table_form_pass() {
    assert!(lint_template("[X] είναι [INDEF;Y] [Y].", "el").is_empty());
    assert!(lint_template("[X] μιλάει [DEF;Y.Fem] [Y].", "el").is_empty());
    assert!(lint_template("[X] ζει [PREPDEF;Y] [Y.Gen].", "el").is_empty());
}

#[test]
fn greek_articles_follow_the_given_table() {
    let table = ArticleTable::parse("el", "στο\tART;PREPDEF;NEUT;SG;NOM\n").unwrap();
    assert!(lint_template_with_articles("[PREPDEF;X] [X] [Y]", "el", &table).is_empty());
    assert_eq!(
        lint_template_with_articles("[DEF;X] [X] [Y]", "el", &table),
        [TemplateWarning::UnresolvableArticle {
            token: "[DEF;X]".to_string(),
            language: "el".to_string(),
        }]
    );
}

#[test]
fn warnings_come_in_template_order() {
    insta::assert_snapshot!(messages("[X.Gn] [DEF;X] [DEF;X] [Y.Dat]", "el"), @r"
    unknown placeholder '[X.Gn]', did you mean '[X.Gen]'?
    placeholder '[Y.Dat]' is not supported for language 'el'
    no [X] slot
    conflicting slots for [X]: [DEF;X], [DEF;X]
    ");
}

#[test]
fn warnings_serialize_to_json() {
    let warnings = lint_template("[X]", "en");
    let json = serde_json::to_string(&warnings).unwrap();
    assert_eq!(json, r#"[{"MissingSlot":{"entity":"Object"}}]"#);
}
