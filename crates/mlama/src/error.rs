//! Error types shared by the loaders and the prompt renderers.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::inflection::InflectionError;
use crate::types::Entity;

/// Errors that occur while loading a resource file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the resource.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of a tab-separated resource could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A line of a JSON or JSON-lines resource could not be deserialized.
    #[error("{path}:{line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error when writing an output file.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// The resource the error is about.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::Write { path, .. } => path,
        }
    }

    /// The 1-based line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } | LoadError::Write { .. } => None,
            LoadError::Parse { line, .. } | LoadError::Json { line, .. } => Some(*line),
        }
    }
}

/// Reads a resource file into a string.
pub(crate) fn read_resource(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// An error that occurred while rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template has no slot for the entity that the language accepts.
    #[error("template has no [{entity}] slot recognized for language '{language}'")]
    MissingPlaceholder { entity: Entity, language: String },

    /// The template uses a placeholder the language variant does not implement.
    #[error("placeholder '{placeholder}' is not supported for language '{language}'")]
    UnsupportedPlaceholder {
        placeholder: String,
        language: String,
    },

    /// More than one slot of the same kind for one entity.
    #[error("conflicting placeholders for [{entity}]: {}", placeholders.join(", "))]
    ConflictingPlaceholders {
        entity: Entity,
        placeholders: Vec<String>,
    },

    /// The article table has no form for the computed key.
    #[error("no article form for '{key}' in the '{language}' article table")]
    MissingArticleForm { key: String, language: String },

    /// The inflection resource could not inflect a lemma.
    #[error(transparent)]
    Inflection(#[from] InflectionError),
}
