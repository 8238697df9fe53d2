//! The evaluation facade: validate, consult the cache, normalise, score.

use std::collections::BTreeSet;
use std::sync::Arc;

use siterank_core::{CandidateSite, EvaluationError, RankedBatch, WeightVector};

use crate::cache::{DatasetId, EvaluationCache, Fingerprint};
use crate::normalise::normalise_batch;
use crate::score::score_batch;

/// Evaluates batches of candidate sites, memoising the most recent result.
///
/// Each evaluator owns one cache slot and assumes single-threaded use, so
/// callers needing concurrency hold one evaluator per thread. Evaluation is
/// deterministic: the same `(dataset, sites, weights)` always yields
/// bit-identical scores and ranks, and a repeat call is served from cache.
///
/// # Examples
/// ```
/// use siterank_core::{CandidateSite, Criterion, WeightVector};
/// use siterank_mcda::{DatasetId, SiteEvaluator};
///
/// let sites = vec![
///     CandidateSite::new(1, "School", 14.59, 120.98)
///         .with_value(Criterion::PopulationDensity, 100.0),
///     CandidateSite::new(2, "Gym", 14.61, 121.00)
///         .with_value(Criterion::PopulationDensity, 300.0),
/// ];
/// let dataset = DatasetId::new("sites.csv", sites.len());
/// let weights = WeightVector::default();
///
/// let mut evaluator = SiteEvaluator::new();
/// let ranked = evaluator.evaluate(&dataset, &sites, &weights)?;
/// assert_eq!(ranked.sites().first().map(|s| s.site.id), Some(2));
/// # Ok::<(), siterank_core::EvaluationError>(())
/// ```
#[derive(Debug, Default)]
pub struct SiteEvaluator {
    cache: EvaluationCache,
}

impl SiteEvaluator {
    /// Construct an evaluator with an empty cache slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cache: EvaluationCache::new(),
        }
    }

    /// Evaluate a batch of sites under the given weights.
    ///
    /// On a cache hit for the same `(dataset, weights)` pair the stored
    /// result is returned without recomputation. On a miss the batch is
    /// normalised, scored, ranked, and the cache slot replaced.
    ///
    /// # Errors
    /// Returns [`EvaluationError::EmptyBatch`] for a batch with no sites
    /// and [`EvaluationError::AllCriteriaMissing`] when no site carries a
    /// value for any recognised criterion.
    pub fn evaluate(
        &mut self,
        dataset: &DatasetId,
        sites: &[CandidateSite],
        weights: &WeightVector,
    ) -> Result<Arc<RankedBatch>, EvaluationError> {
        if sites.is_empty() {
            return Err(EvaluationError::EmptyBatch);
        }
        if !sites.iter().any(CandidateSite::has_any_criterion) {
            return Err(EvaluationError::AllCriteriaMissing);
        }

        let fingerprint = Fingerprint::compute(dataset, weights);
        let criteria: BTreeSet<_> = weights.criteria().collect();
        self.cache.get_or_compute(fingerprint, || {
            log::debug!(
                "evaluating {} sites over {} criteria from {}",
                sites.len(),
                criteria.len(),
                dataset.source()
            );
            score_batch(normalise_batch(sites, &criteria), weights)
        })
    }

    /// Evaluate with the documented default weight vector.
    ///
    /// # Errors
    /// As for [`SiteEvaluator::evaluate`].
    pub fn evaluate_with_defaults(
        &mut self,
        dataset: &DatasetId,
        sites: &[CandidateSite],
    ) -> Result<Arc<RankedBatch>, EvaluationError> {
        self.evaluate(dataset, sites, &WeightVector::default())
    }

    /// Drop the cached result, forcing the next evaluation to recompute.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use siterank_core::Criterion;

    #[fixture]
    fn sites() -> Vec<CandidateSite> {
        vec![
            CandidateSite::new(1, "A", 0.0, 0.0).with_value(Criterion::Accessibility, 1.0),
            CandidateSite::new(2, "B", 0.0, 0.0).with_value(Criterion::Accessibility, 2.0),
        ]
    }

    #[rstest]
    fn empty_batch_is_rejected_before_normalisation() {
        let mut evaluator = SiteEvaluator::new();
        let dataset = DatasetId::new("empty.csv", 0);
        assert_eq!(
            evaluator
                .evaluate(&dataset, &[], &WeightVector::default())
                .unwrap_err(),
            EvaluationError::EmptyBatch
        );
    }

    #[rstest]
    fn batch_without_any_criterion_values_is_rejected(mut sites: Vec<CandidateSite>) {
        for site in &mut sites {
            site.set_value(Criterion::Accessibility, None);
        }
        let mut evaluator = SiteEvaluator::new();
        let dataset = DatasetId::new("bare.csv", sites.len());
        assert_eq!(
            evaluator
                .evaluate(&dataset, &sites, &WeightVector::default())
                .unwrap_err(),
            EvaluationError::AllCriteriaMissing
        );
    }

    #[rstest]
    fn repeat_evaluation_is_served_from_cache(sites: Vec<CandidateSite>) {
        let mut evaluator = SiteEvaluator::new();
        let dataset = DatasetId::new("sites.csv", sites.len());
        let weights = WeightVector::default();

        let first = evaluator
            .evaluate(&dataset, &sites, &weights)
            .expect("first evaluation");
        let second = evaluator
            .evaluate(&dataset, &sites, &weights)
            .expect("second evaluation");

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[rstest]
    fn changing_weights_recomputes(sites: Vec<CandidateSite>) {
        let mut evaluator = SiteEvaluator::new();
        let dataset = DatasetId::new("sites.csv", sites.len());

        let first = evaluator
            .evaluate(&dataset, &sites, &WeightVector::default())
            .expect("first evaluation");
        let reweighted = WeightVector::empty()
            .with_weight(Criterion::Accessibility, 1.0)
            .expect("valid weights");
        let second = evaluator
            .evaluate(&dataset, &sites, &reweighted)
            .expect("second evaluation");

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[rstest]
    fn invalidate_forces_a_fresh_result(sites: Vec<CandidateSite>) {
        let mut evaluator = SiteEvaluator::new();
        let dataset = DatasetId::new("sites.csv", sites.len());
        let weights = WeightVector::default();

        let first = evaluator
            .evaluate(&dataset, &sites, &weights)
            .expect("first evaluation");
        evaluator.invalidate();
        let second = evaluator
            .evaluate(&dataset, &sites, &weights)
            .expect("recomputed evaluation");

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[rstest]
    fn default_weight_evaluation_matches_explicit_defaults(sites: Vec<CandidateSite>) {
        let mut with_defaults = SiteEvaluator::new();
        let mut explicit = SiteEvaluator::new();
        let dataset = DatasetId::new("sites.csv", sites.len());

        let a = with_defaults
            .evaluate_with_defaults(&dataset, &sites)
            .expect("default evaluation");
        let b = explicit
            .evaluate(&dataset, &sites, &WeightVector::default())
            .expect("explicit evaluation");

        assert_eq!(*a, *b);
    }
}
