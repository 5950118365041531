//! Miette diagnostics for resource files that fail to load.

use std::fs::read_to_string;

use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use mlama::LoadError;
use thiserror::Error;

/// A load error pointing at the offending line of a resource file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(mlama::load))]
pub struct LoadDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,
}

impl LoadDiagnostic {
    /// Highlights the whole of 1-based `line` in `content`.
    pub fn new(name: String, content: String, line: usize, message: String) -> Self {
        // Sum of (line_length + 1) for lines before the error line.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            .min(content.len());
        let length = content
            .lines()
            .nth(line.saturating_sub(1))
            .map_or(0, str::len);

        LoadDiagnostic {
            src: NamedSource::new(name, content),
            span: (offset, length).into(),
            message,
        }
    }
}

/// Converts a load error into a report, with source context when the error
/// has a line and the file can still be read.
pub fn load_error_report(err: LoadError) -> Report {
    let Some(line) = err.line() else {
        return miette!("{}", err);
    };
    let path = err.path();
    match read_to_string(path) {
        Ok(content) => LoadDiagnostic::new(
            path.display().to_string(),
            content,
            line,
            err.to_string(),
        )
        .into(),
        Err(_) => miette!("{}", err),
    }
}
