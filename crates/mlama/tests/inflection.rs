//! Tests for inflection lookup, its cache and UniMorph tables.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use mlama::{
    Case, FeatureBundle, GrammaticalGender, InflectionCache, InflectionError, InflectionLookup,
    Inflector, Number, UnimorphTable,
};

/// Counts calls and fails for lemmas starting with `!`.
#[derive(Default)]
struct CountingInflector {
    calls: AtomicUsize,
}

impl Inflector for CountingInflector {
    fn inflect(
        &self,
        lemma: &str,
        features: &FeatureBundle,
        _language: &str,
    ) -> Result<Vec<String>, InflectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if lemma.starts_with('!') {
            return Err(InflectionError::Resource {
                message: "service unavailable".to_string(),
            });
        }
        Ok(vec![format!("{lemma}+{features}")])
    }
}

fn genitive() -> FeatureBundle {
    FeatureBundle::noun(Case::Genitive, Number::Singular)
}

// =========================================================================
// Feature Bundles
// =========================================================================

#[test]
fn feature_bundles_render_unimorph_tags() {
    assert_eq!(genitive().to_string(), "N;GEN;SG");
    assert_eq!(
        FeatureBundle::past_verb(Number::Singular, GrammaticalGender::Fem).to_string(),
        "V;PST;SG;FEM"
    );
    assert_eq!(
        FeatureBundle::long_adjective(GrammaticalGender::Neut, Number::Singular).to_string(),
        "ADJ;NEUT;SG;LGSPEC1"
    );
}

// =========================================================================
// Cache
// =========================================================================

#[test]
fn repeated_lookups_call_the_resource_once() {
    let inflector = Arc::new(CountingInflector::default());
    let lookup = InflectionLookup::new(Arc::clone(&inflector));

    for _ in 0..3 {
        assert_eq!(
            lookup.first_form("Москва", &genitive(), "rus").unwrap(),
            "Москва+N;GEN;SG"
        );
    }
    assert_eq!(inflector.calls.load(Ordering::SeqCst), 1);
    assert_eq!(lookup.cache().len(), 1);
    let stats = lookup.cache().stats();
    assert_eq!((stats.hits, stats.misses), (2, 1));
}

#[test]
fn cache_keys_include_features_and_language() {
    let inflector = Arc::new(CountingInflector::default());
    let lookup = InflectionLookup::new(Arc::clone(&inflector));

    lookup.inflect("Москва", &genitive(), "rus").unwrap();
    lookup
        .inflect("Москва", &FeatureBundle::noun(Case::Essive, Number::Singular), "rus")
        .unwrap();
    lookup.inflect("Москва", &genitive(), "ukr").unwrap();
    assert_eq!(inflector.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn failures_are_not_cached() {
    let inflector = Arc::new(CountingInflector::default());
    let lookup = InflectionLookup::new(Arc::clone(&inflector));

    for _ in 0..2 {
        let err = lookup.inflect("!broken", &genitive(), "rus").unwrap_err();
        assert_eq!(err.to_string(), "inflection resource failed: service unavailable");
    }
    assert_eq!(inflector.calls.load(Ordering::SeqCst), 2);
    assert!(lookup.cache().is_empty());
}

#[test]
fn shared_cache_across_lookups_and_threads() {
    let inflector: Arc<dyn Inflector> = Arc::new(CountingInflector::default());
    let cache = Arc::new(InflectionCache::new());
    let first = InflectionLookup::with_cache(Arc::clone(&inflector), Arc::clone(&cache));
    let second = InflectionLookup::with_cache(inflector, Arc::clone(&cache));

    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|lookup| {
            thread::spawn(move || {
                for lemma in ["Москва", "Киев", "Минск"] {
                    lookup.first_form(lemma, &genitive(), "rus").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 3);
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits, 0);
}

// =========================================================================
// UniMorph Tables
// =========================================================================

#[test]
fn unimorph_matches_tag_sets_in_any_order() {
    let mut table = UnimorphTable::new();
    table
        .load_str("rus", "родиться\tродилась\tV;FEM;PST;SG\n")
        .unwrap();
    let features = FeatureBundle::past_verb(Number::Singular, GrammaticalGender::Fem);
    assert_eq!(table.inflect("родиться", &features, "rus").unwrap(), ["родилась"]);
}

#[test]
fn unimorph_returns_all_candidates_in_file_order() {
    let mut table = UnimorphTable::new();
    table.insert("ell2", "Πειραιάς", "Πειραιά", "N;ACC;SG");
    table.insert("ell2", "Πειραιάς", "Πειραιάν", "n;acc;sg");
    let features = FeatureBundle::noun(Case::Accusative, Number::Singular);
    assert_eq!(
        table.inflect("Πειραιάς", &features, "ell2").unwrap(),
        ["Πειραιά", "Πειραιάν"]
    );
}

#[test]
fn unimorph_distinguishes_unknown_lemmas_from_missing_forms() {
    let mut table = UnimorphTable::new();
    table.insert("rus", "Москва", "Москвы", "N;GEN;SG");

    let err = table.inflect("Тверь", &genitive(), "rus").unwrap_err();
    assert!(matches!(err, InflectionError::UnknownLemma { .. }));

    let dative = FeatureBundle::noun(Case::Dative, Number::Singular);
    let err = table.inflect("Москва", &dative, "rus").unwrap_err();
    assert_eq!(
        err.to_string(),
        "no 'N;DAT;SG' form of 'Москва' in the 'rus' inflection resource"
    );

    let err = table.inflect("Москва", &genitive(), "ell2").unwrap_err();
    assert!(matches!(err, InflectionError::UnknownLemma { .. }));
}
