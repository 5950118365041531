use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::types::FeatureBundle;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct CacheKey {
    pub lemma: String,
    pub features: FeatureBundle,
    pub language: String,
}

/// Hit and miss counters of an [`InflectionCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Unbounded memo of inflection results for the lifetime of one probing run.
///
/// Only successful lookups are stored. Concurrent callers read if present,
/// otherwise compute and insert; a racing duplicate insert stores the same
/// value because the underlying resource is deterministic.
#[derive(Debug, Default)]
pub struct InflectionCache {
    entries: RwLock<HashMap<CacheKey, Vec<String>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl InflectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn get(&self, key: &CacheKey) -> Option<Vec<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let found = entries.get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub(super) fn insert(&self, key: CacheKey, forms: Vec<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(forms);
    }

    /// Number of memoized `(lemma, features, language)` triples.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drops all memoized entries and resets the counters.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
