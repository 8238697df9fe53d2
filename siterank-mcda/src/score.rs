//! Weighted aggregation of normalised scores into a ranked batch.

use siterank_core::{
    EvaluatedSite, EvaluationError, RECOMMENDATION_THRESHOLD, RankedBatch, WeightVector,
};

use crate::normalise::{NEUTRAL_SCORE, NormalisedSite};

/// Combine normalised scores into totals, assign dense ranks, and flag
/// recommended sites.
///
/// The total is the weighted sum over exactly the criteria present in
/// `weights`, taken literally: no clamping, so a vector summing above 1 can
/// push totals above 1. Ranks run `1..=N` by descending total; equal totals
/// keep their input order, the earlier site taking the better rank.
///
/// # Errors
/// Returns [`EvaluationError::EmptyBatch`] when `normalised` holds no sites.
pub fn score_batch(
    normalised: Vec<NormalisedSite>,
    weights: &WeightVector,
) -> Result<RankedBatch, EvaluationError> {
    if normalised.is_empty() {
        return Err(EvaluationError::EmptyBatch);
    }

    let mut scored: Vec<(NormalisedSite, f64)> = normalised
        .into_iter()
        .map(|site| {
            let total = total_score(&site, weights);
            (site, total)
        })
        .collect();

    // Stable sort: ties keep input order, so ranks stay a permutation.
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let sites = scored
        .into_iter()
        .zip(1_usize..)
        .map(|((site, total), rank)| EvaluatedSite {
            site: site.site,
            normalised: site.scores,
            total_score: total,
            rank,
            recommended: total >= RECOMMENDATION_THRESHOLD,
        })
        .collect();

    Ok(RankedBatch::new(sites))
}

#[expect(
    clippy::float_arithmetic,
    reason = "the weighted sum is the purpose of this function"
)]
fn total_score(site: &NormalisedSite, weights: &WeightVector) -> f64 {
    weights
        .iter()
        .map(|(criterion, weight)| {
            let score = site
                .scores
                .get(&criterion)
                .copied()
                .unwrap_or(NEUTRAL_SCORE);
            weight * score
        })
        .sum()
}
