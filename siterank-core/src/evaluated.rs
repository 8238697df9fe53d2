//! Evaluated sites and the ranked batch they belong to.

use std::collections::BTreeMap;

use crate::{CandidateSite, Criterion};

/// Total-score cutoff above which a site is flagged as recommended.
///
/// Fixed for now; kept as a named constant so it can become configurable.
pub const RECOMMENDATION_THRESHOLD: f64 = 0.6;

/// A candidate site annotated with its evaluation results.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedSite {
    /// The site as supplied, raw values included.
    pub site: CandidateSite,
    /// Normalised desirability per criterion in the active weight vector.
    pub normalised: BTreeMap<Criterion, f64>,
    /// Weighted sum of the normalised scores.
    pub total_score: f64,
    /// Dense rank, 1 is best, unique within the batch.
    pub rank: usize,
    /// Whether `total_score` reached [`RECOMMENDATION_THRESHOLD`].
    pub recommended: bool,
}

impl EvaluatedSite {
    /// Return the normalised score for a criterion, if it was evaluated.
    #[must_use]
    pub fn normalised_score(&self, criterion: Criterion) -> Option<f64> {
        self.normalised.get(&criterion).copied()
    }
}

/// The outcome of evaluating one batch, ordered by rank ascending.
///
/// # Examples
/// ```no_run
/// # fn ranked() -> siterank_core::RankedBatch { unimplemented!() }
/// let batch = ranked();
/// for site in batch.top(10) {
///     println!("#{} {} {:.3}", site.rank, site.site.name, site.total_score);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBatch {
    sites: Vec<EvaluatedSite>,
}

impl RankedBatch {
    /// Construct a batch, ordering the sites by rank ascending.
    #[must_use]
    pub fn new(mut sites: Vec<EvaluatedSite>) -> Self {
        sites.sort_by_key(|site| site.rank);
        Self { sites }
    }

    /// The evaluated sites, best rank first.
    #[must_use]
    pub fn sites(&self) -> &[EvaluatedSite] {
        &self.sites
    }

    /// Number of evaluated sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Report whether the batch holds no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The best-ranked `n` sites (fewer when the batch is smaller).
    #[must_use]
    pub fn top(&self, n: usize) -> &[EvaluatedSite] {
        self.sites.get(..n.min(self.sites.len())).unwrap_or_default()
    }

    /// Number of sites whose score reached the recommendation threshold.
    #[must_use]
    pub fn recommended_count(&self) -> usize {
        self.sites.iter().filter(|site| site.recommended).count()
    }

    /// Mean total score across the batch; `0.0` for an empty batch.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "summary statistic over an in-memory batch"
    )]
    pub fn mean_score(&self) -> f64 {
        if self.sites.is_empty() {
            return 0.0;
        }
        let total: f64 = self.sites.iter().map(|site| site.total_score).sum();
        total / self.sites.len() as f64
    }

    /// Iterate over the evaluated sites, best rank first.
    pub fn iter(&self) -> std::slice::Iter<'_, EvaluatedSite> {
        self.sites.iter()
    }
}

impl<'a> IntoIterator for &'a RankedBatch {
    type Item = &'a EvaluatedSite;
    type IntoIter = std::slice::Iter<'a, EvaluatedSite>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
