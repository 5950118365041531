//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// One lint finding.
pub struct TemplateProblem {
    pub relation: String,
    pub language: String,
    pub template: String,
    pub message: String,
}

/// Format lint findings as a table.
pub fn format_problem_table(problems: &[TemplateProblem]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Relation", "Language", "Template", "Problem"]);

    for problem in problems {
        table.add_row(vec![
            problem.relation.clone(),
            problem.language.clone(),
            problem.template.clone(),
            problem.message.clone(),
        ]);
    }

    table
}

/// Format an article coverage grid: one row per key.
pub fn format_article_table(rows: &[(String, Option<String>)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Form"]);

    for (key, form) in rows {
        table.add_row(vec![key.clone(), form.clone().unwrap_or_else(|| "-".to_string())]);
    }

    table
}
