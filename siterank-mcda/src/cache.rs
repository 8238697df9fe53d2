//! Single-slot memoisation of the last evaluation.
//!
//! The cache key is a structured fingerprint compared by value, not a
//! digest: identical weights and dataset identity match, and distinct
//! inputs can never alias the way a string hash could collide. Only the
//! most recent evaluation is retained.

use std::sync::Arc;

use siterank_core::{Criterion, RankedBatch, WeightVector};

/// Identity token for a raw dataset: where it came from and how many rows
/// it carried. Replacing the underlying data changes the token and
/// invalidates the cached result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetId {
    source: String,
    row_count: usize,
}

impl DatasetId {
    /// Construct an identity token from a source label and row count.
    #[must_use]
    pub fn new(source: impl Into<String>, row_count: usize) -> Self {
        Self {
            source: source.into(),
            row_count,
        }
    }

    /// The source label, typically a file name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of rows in the dataset.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }
}

/// Deterministic cache key over a dataset identity and a weight vector.
///
/// Weights are captured as sorted `(criterion, bit-pattern)` pairs so the
/// comparison is exact: the same weights and dataset always produce an
/// equal fingerprint, and nothing else does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    dataset: DatasetId,
    weight_bits: Vec<(Criterion, u64)>,
}

impl Fingerprint {
    /// Compute the fingerprint for a `(dataset, weights)` pair.
    #[must_use]
    pub fn compute(dataset: &DatasetId, weights: &WeightVector) -> Self {
        let weight_bits = weights
            .iter()
            .map(|(criterion, weight)| (criterion, weight.to_bits()))
            .collect();
        Self {
            dataset: dataset.clone(),
            weight_bits,
        }
    }
}

/// Memoises the most recent evaluation result.
#[derive(Debug, Default)]
pub struct EvaluationCache {
    slot: Option<(Fingerprint, Arc<RankedBatch>)>,
}

impl EvaluationCache {
    /// Construct an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Return the cached batch for `fingerprint`, or compute, store, and
    /// return a fresh one, evicting whatever was held before.
    ///
    /// The closure is not invoked on a fingerprint match, so a sequence of
    /// calls with unchanged inputs recomputes at most once.
    ///
    /// # Errors
    /// Propagates the closure's error; the previous entry is kept when the
    /// computation fails.
    pub fn get_or_compute<E>(
        &mut self,
        fingerprint: Fingerprint,
        compute: impl FnOnce() -> Result<RankedBatch, E>,
    ) -> Result<Arc<RankedBatch>, E> {
        if let Some((cached, batch)) = &self.slot {
            if *cached == fingerprint {
                log::debug!(
                    "evaluation cache hit for {} ({} rows)",
                    fingerprint_source(cached),
                    batch.len()
                );
                return Ok(Arc::clone(batch));
            }
        }

        log::debug!(
            "evaluation cache miss for {}, recomputing",
            fingerprint_source(&fingerprint)
        );
        let batch = Arc::new(compute()?);
        self.slot = Some((fingerprint, Arc::clone(&batch)));
        Ok(batch)
    }

    /// The fingerprint of the cached entry, if any.
    #[must_use]
    pub fn cached_fingerprint(&self) -> Option<&Fingerprint> {
        self.slot.as_ref().map(|(fingerprint, _)| fingerprint)
    }

    /// Drop the cached entry, forcing the next call to recompute.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

fn fingerprint_source(fingerprint: &Fingerprint) -> &str {
    fingerprint.dataset.source()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use siterank_core::EvaluationError;

    fn fingerprint(source: &str, rows: usize, weights: &WeightVector) -> Fingerprint {
        Fingerprint::compute(&DatasetId::new(source, rows), weights)
    }

    #[rstest]
    fn identical_inputs_produce_equal_fingerprints() {
        let weights = WeightVector::default();
        assert_eq!(
            fingerprint("sites.csv", 10, &weights),
            fingerprint("sites.csv", 10, &weights)
        );
    }

    #[rstest]
    fn fingerprint_changes_with_dataset_identity() {
        let weights = WeightVector::default();
        assert_ne!(
            fingerprint("sites.csv", 10, &weights),
            fingerprint("sites.csv", 11, &weights)
        );
        assert_ne!(
            fingerprint("sites.csv", 10, &weights),
            fingerprint("other.csv", 10, &weights)
        );
    }

    #[rstest]
    fn fingerprint_changes_with_weights() {
        let a = WeightVector::default();
        let b = WeightVector::empty()
            .with_weight(siterank_core::Criterion::RiskLevel, 1.0)
            .expect("valid weights");
        assert_ne!(fingerprint("sites.csv", 10, &a), fingerprint("sites.csv", 10, &b));
    }

    #[rstest]
    fn matching_fingerprint_skips_recomputation() {
        let weights = WeightVector::default();
        let mut cache = EvaluationCache::new();
        let key = fingerprint("sites.csv", 0, &weights);

        let first: Result<_, EvaluationError> =
            cache.get_or_compute(key.clone(), || Ok(RankedBatch::new(Vec::new())));
        let first = first.expect("first computation");

        let second: Result<_, EvaluationError> = cache.get_or_compute(key, || {
            panic!("closure must not run on a cache hit")
        });
        let second = second.expect("cache hit");

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[rstest]
    fn mismatch_evicts_the_previous_entry() {
        let weights = WeightVector::default();
        let mut cache = EvaluationCache::new();
        let old_key = fingerprint("old.csv", 1, &weights);
        let new_key = fingerprint("new.csv", 1, &weights);

        let seeded: Result<_, EvaluationError> =
            cache.get_or_compute(old_key.clone(), || Ok(RankedBatch::new(Vec::new())));
        seeded.expect("seed the cache");
        let replaced: Result<_, EvaluationError> =
            cache.get_or_compute(new_key.clone(), || Ok(RankedBatch::new(Vec::new())));
        replaced.expect("replace the entry");

        assert_eq!(cache.cached_fingerprint(), Some(&new_key));

        // The evicted key now recomputes.
        let mut ran = false;
        let recomputed: Result<_, EvaluationError> = cache.get_or_compute(old_key, || {
            ran = true;
            Ok(RankedBatch::new(Vec::new()))
        });
        recomputed.expect("recompute evicted entry");
        assert!(ran);
    }

    #[rstest]
    fn failed_computation_keeps_the_previous_entry() {
        let weights = WeightVector::default();
        let mut cache = EvaluationCache::new();
        let good = fingerprint("good.csv", 1, &weights);
        let bad = fingerprint("bad.csv", 0, &weights);

        let seeded: Result<_, EvaluationError> =
            cache.get_or_compute(good.clone(), || Ok(RankedBatch::new(Vec::new())));
        seeded.expect("seed the cache");
        let err = cache
            .get_or_compute(bad, || Err(EvaluationError::EmptyBatch))
            .expect_err("computation fails");

        assert_eq!(err, EvaluationError::EmptyBatch);
        assert_eq!(cache.cached_fingerprint(), Some(&good));
    }

    #[rstest]
    fn clear_empties_the_slot() {
        let weights = WeightVector::default();
        let mut cache = EvaluationCache::new();
        let seeded: Result<_, EvaluationError> =
            cache.get_or_compute(fingerprint("sites.csv", 1, &weights), || {
                Ok(RankedBatch::new(Vec::new()))
            });
        seeded.expect("seed the cache");

        cache.clear();
        assert!(cache.cached_fingerprint().is_none());
    }
}
