//! Implementation of the `mlama render` command.

use std::path::PathBuf;

use mlama::{
    ArticleTable, Gender, InflectionLookup, LanguageResources, Prompt, RenderOptions, SlotSet,
    UnimorphTable,
};
use serde::Serialize;
use tracing::debug;

use crate::output::load_error_report;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Language code (e.g., en, el, ru)
    #[arg(long, required = true)]
    pub lang: String,

    /// Template with [X] and [Y] slots
    #[arg(long, required = true)]
    pub template: String,

    /// Subject label
    #[arg(long, required = true)]
    pub sub: String,

    /// Object label
    #[arg(long, required = true)]
    pub obj: String,

    /// Subject gender: male, female, none or unknown
    #[arg(long, default_value = "unknown")]
    pub sub_gender: Gender,

    /// Object gender: male, female, none or unknown
    #[arg(long, default_value = "unknown")]
    pub obj_gender: Gender,

    /// Number of mask symbols for the object; 0 inserts the object label
    #[arg(long, default_value_t = 1)]
    pub num_mask: usize,

    /// Mask symbol of the model
    #[arg(long, default_value = "[MASK]")]
    pub mask_symbol: String,

    /// Article table file (surface<TAB>key)
    #[arg(long)]
    pub articles: Option<PathBuf>,

    /// UniMorph inflection table files (lemma<TAB>form<TAB>features, repeatable)
    #[arg(long)]
    pub inflections: Vec<PathBuf>,

    /// Entity slots never to inflect (x, y or x,y)
    #[arg(long, default_value = "")]
    pub disable_inflection: SlotSet,

    /// Render article slots as empty strings
    #[arg(long)]
    pub disable_article: bool,

    /// Apply the language's model-input normalization
    #[arg(long)]
    pub normalize: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub text: String,
    pub gold: String,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let mut table = UnimorphTable::new();
    if let Some(code) = Prompt::inflection_language(&args.lang) {
        for path in &args.inflections {
            let entries = table.load(code, path).map_err(load_error_report)?;
            debug!(path = %path.display(), entries, "loaded inflection table");
        }
    }

    let articles = args
        .articles
        .as_ref()
        .map(|path| ArticleTable::load(args.lang.as_str(), path))
        .transpose()
        .map_err(load_error_report)?;

    let resources = LanguageResources::builder()
        .inflection(InflectionLookup::new(table))
        .maybe_articles(articles)
        .build();
    let options = RenderOptions::builder()
        .disable_inflection(args.disable_inflection)
        .disable_article(args.disable_article)
        .build();
    let prompt = Prompt::from_lang(&args.lang, options, resources);

    let rendered = prompt
        .fill_x(&args.template, "", &args.sub, args.sub_gender)
        .and_then(|with_subject| {
            prompt.fill_y(
                &with_subject.text,
                "",
                &args.obj,
                args.obj_gender,
                args.num_mask,
                &args.mask_symbol,
            )
        });

    match rendered {
        Ok(rendered) => {
            let text = if args.normalize {
                prompt.normalize(&rendered.text, &args.mask_symbol)
            } else {
                rendered.text
            };
            if args.json {
                let output = RenderResult {
                    text,
                    gold: rendered.label,
                };
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
                println!("{}", json);
            } else {
                println!("{}", text);
                println!("gold: {}", rendered.label);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", output);
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
