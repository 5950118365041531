//! Implementation of the `mlama articles` command.

use std::path::PathBuf;

use miette::miette;
use mlama::{ArticleTable, Case};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::load_error_report;
use crate::output::table::format_article_table;

/// Cases every article key is expected to cover.
const CASES: [Case; 3] = [Case::Nominative, Case::Genitive, Case::Accusative];

/// Arguments for the articles command.
#[derive(Debug, clap::Args)]
pub struct ArticlesArgs {
    /// Language of the article table
    #[arg(long, default_value = "el")]
    pub lang: String,

    /// Article table file (surface<TAB>key). Defaults to the bundled Greek table.
    #[arg(long)]
    pub articles: Option<PathBuf>,

    /// Exit with non-zero code if any key has no form
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    covered: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the articles command.
pub fn run_articles(args: ArticlesArgs) -> miette::Result<i32> {
    let table = match (&args.articles, args.lang.as_str()) {
        (Some(path), lang) => ArticleTable::load(lang, path).map_err(load_error_report)?,
        (None, "el") => ArticleTable::greek(),
        (None, lang) => {
            return Err(miette!(
                "No bundled article table for '{}', pass --articles",
                lang
            ))
        }
    };

    let coverage = table.coverage(&CASES);
    let missing: Vec<String> = coverage
        .iter()
        .filter(|entry| entry.form.is_none())
        .map(|entry| entry.key.to_string())
        .collect();
    let covered = coverage.len() - missing.len();

    if args.json {
        let output = CoverageJson {
            language: table.language().to_string(),
            covered,
            total: coverage.len(),
            missing,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        let rows: Vec<(String, Option<String>)> = coverage
            .iter()
            .map(|entry| (entry.key.to_string(), entry.form.map(str::to_string)))
            .collect();
        println!("{}", format_article_table(&rows));
        let summary = format!("{}/{} keys covered", covered, coverage.len());
        if missing.is_empty() {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.yellow());
        }
    }

    if args.strict && covered < coverage.len() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
