use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use tracing::debug;

use super::cache::{CacheKey, InflectionCache};
use super::{InflectionError, UnimorphTable};
use crate::types::FeatureBundle;

/// An external morphological inflection resource.
///
/// Given a lemma, a feature bundle and a resource language code, returns the
/// candidate surface forms in preference order. Implementations must be
/// deterministic: the same input always yields the same output.
pub trait Inflector: Send + Sync {
    fn inflect(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        language: &str,
    ) -> Result<Vec<String>, InflectionError>;
}

impl<T: Inflector + ?Sized> Inflector for Arc<T> {
    fn inflect(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        language: &str,
    ) -> Result<Vec<String>, InflectionError> {
        (**self).inflect(lemma, features, language)
    }
}

/// Memoizing front end over an [`Inflector`].
///
/// Cloning a lookup shares both the resource and the cache.
///
/// # Example
///
/// ```
/// use mlama::{Case, FeatureBundle, InflectionLookup, Number, UnimorphTable};
///
/// let mut table = UnimorphTable::new();
/// table.insert("rus", "Москва", "Москвы", "N;GEN;SG");
/// let lookup = InflectionLookup::new(table);
///
/// let features = FeatureBundle::noun(Case::Genitive, Number::Singular);
/// assert_eq!(lookup.first_form("Москва", &features, "rus").unwrap(), "Москвы");
/// assert_eq!(lookup.cache().len(), 1);
/// ```
#[derive(Clone)]
pub struct InflectionLookup {
    inflector: Arc<dyn Inflector>,
    cache: Arc<InflectionCache>,
}

impl InflectionLookup {
    /// Creates a lookup with a fresh cache.
    pub fn new(inflector: impl Inflector + 'static) -> Self {
        Self::with_cache(Arc::new(inflector), Arc::new(InflectionCache::new()))
    }

    /// Creates a lookup over an existing cache, e.g. one shared by several
    /// renderers of the same run.
    pub fn with_cache(inflector: Arc<dyn Inflector>, cache: Arc<InflectionCache>) -> Self {
        Self { inflector, cache }
    }

    /// All candidate forms, served from the cache when possible.
    ///
    /// Errors from the resource are propagated and never cached.
    pub fn inflect(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        language: &str,
    ) -> Result<Vec<String>, InflectionError> {
        let key = CacheKey {
            lemma: lemma.to_string(),
            features: features.clone(),
            language: language.to_string(),
        };
        if let Some(forms) = self.cache.get(&key) {
            return Ok(forms);
        }
        debug!(lemma, %features, language, "inflection cache miss");
        let forms = self.inflector.inflect(lemma, features, language)?;
        self.cache.insert(key, forms.clone());
        Ok(forms)
    }

    /// The preferred (first) candidate form.
    pub fn first_form(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        language: &str,
    ) -> Result<String, InflectionError> {
        self.inflect(lemma, features, language)?
            .into_iter()
            .next()
            .ok_or_else(|| InflectionError::EmptyForms {
                lemma: lemma.to_string(),
                features: features.to_string(),
                language: language.to_string(),
            })
    }

    pub fn cache(&self) -> &InflectionCache {
        &self.cache
    }
}

impl Default for InflectionLookup {
    /// A lookup over an empty UniMorph table: every lemma is unknown.
    fn default() -> Self {
        Self::new(UnimorphTable::new())
    }
}

impl Debug for InflectionLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InflectionLookup")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
