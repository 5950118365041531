use std::path::Path;

use bon::Builder;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::data::Portion;
use crate::error::{LoadError, read_resource};

/// Settings of a probing run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes.
///
/// ```
/// use mlama::probe::ProbeConfig;
///
/// let config = ProbeConfig::from_json_str(r#"{ "max_mask": 3, "portion": "trans" }"#).unwrap();
/// assert_eq!(config.max_mask, 3);
/// assert_eq!(config.batch_size, 4);
/// assert_eq!(config.mask_symbol, "[MASK]");
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct ProbeConfig {
    /// Largest number of mask tokens tried for an object. At least 1.
    #[builder(default = 5)]
    #[serde(deserialize_with = "at_least_one")]
    pub max_mask: usize,
    /// Facts per model call; each fact contributes `max_mask` sequences.
    #[builder(default = 4)]
    pub batch_size: usize,
    #[builder(default = "[MASK]".to_string())]
    pub mask_symbol: String,
    #[builder(default)]
    pub portion: Portion,
    /// Fall back to the fallback language for both labels when either is
    /// missing.
    #[builder(default)]
    pub sub_obj_same_lang: bool,
    /// Skip facts whose object label contains a space.
    #[builder(default)]
    pub skip_multi_word: bool,
    /// Vocabulary ids the model may never predict.
    #[builder(default)]
    pub restricted_vocab: Vec<u32>,
    #[builder(default = "en".to_string())]
    pub fallback_language: String,
    /// Apply the language's normalization to model input and gold labels.
    #[builder(default)]
    pub normalize: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ProbeConfig {
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Self::parse_json(content, Path::new("<probe config>"))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        Self::parse_json(&content, path)
    }

    fn parse_json(content: &str, path: &Path) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        })
    }
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = usize::deserialize(deserializer)?;
    if value == 0 {
        return Err(D::Error::custom("max_mask must be at least 1"));
    }
    Ok(value)
}
