//! Implementation of the `mlama check` command.

use std::path::PathBuf;

use mlama::data::PromptTable;
use mlama::prompt::lint_template_with_articles;
use mlama::ArticleTable;
use serde::Serialize;

use crate::output::load_error_report;
use crate::output::table::{format_problem_table, TemplateProblem};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Prompt table (pid<TAB>lang...) to check
    #[arg(long, required = true)]
    pub prompts: PathBuf,

    /// Languages to check (comma-separated). Defaults to every column.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Greek article table (surface<TAB>key) to check article slots against.
    /// Defaults to the bundled table.
    #[arg(long)]
    pub articles: Option<PathBuf>,

    /// Exit with non-zero code if any template has a problem
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one problem.
#[derive(Debug, Serialize)]
struct ProblemJson<'a> {
    relation: &'a str,
    language: &'a str,
    template: &'a str,
    problem: &'a str,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let table = PromptTable::load(&args.prompts).map_err(load_error_report)?;
    let articles = match &args.articles {
        Some(path) => ArticleTable::load("el", path).map_err(load_error_report)?,
        None => ArticleTable::greek(),
    };
    let languages = if args.lang.is_empty() {
        table.languages().to_vec()
    } else {
        args.lang.clone()
    };

    let mut problems = Vec::new();
    let mut checked = 0;
    for relation in table.relations() {
        for language in &languages {
            for template in table.templates(relation, language) {
                checked += 1;
                for warning in lint_template_with_articles(template, language, &articles) {
                    problems.push(TemplateProblem {
                        relation: relation.clone(),
                        language: language.clone(),
                        template: template.clone(),
                        message: warning.to_string(),
                    });
                }
            }
        }
    }

    if args.json {
        let json: Vec<ProblemJson<'_>> = problems
            .iter()
            .map(|p| ProblemJson {
                relation: &p.relation,
                language: &p.language,
                template: &p.template,
                problem: &p.message,
            })
            .collect();
        let output = serde_json::to_string_pretty(&json)
            .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
        println!("{}", output);
    } else if problems.is_empty() {
        println!("{} templates checked, no problems found", checked);
    } else {
        println!("{}", format_problem_table(&problems));
        println!("\n{} problem(s) in {} templates", problems.len(), checked);
    }

    if args.strict && !problems.is_empty() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
