//! Batch min–max normalisation of raw criterion values.
//!
//! Every score is relative to the batch itself: the same raw value can
//! normalise differently in two different batches. Missing values are
//! imputed to [`NEUTRAL_SCORE`] and excluded from the min/max computation
//! so they never distort the scaling of the sites that do carry values.
//! Non-finite raw values count as missing for the same reason.

use std::collections::{BTreeMap, BTreeSet};

use siterank_core::{CandidateSite, Criterion, Direction};

/// Score assigned when a value is missing or a criterion has zero spread.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// A candidate site with its normalised per-criterion scores attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalisedSite {
    /// The site as supplied.
    pub site: CandidateSite,
    /// Desirability in `[0, 1]` for each requested criterion.
    pub scores: BTreeMap<Criterion, f64>,
}

/// Normalise a batch of sites over the requested criteria.
///
/// Pure function of its inputs: no state survives between batches. Each
/// output carries one score per requested criterion, even when the raw
/// value was missing everywhere.
#[must_use]
pub fn normalise_batch(
    sites: &[CandidateSite],
    criteria: &BTreeSet<Criterion>,
) -> Vec<NormalisedSite> {
    let spreads: BTreeMap<Criterion, Option<(f64, f64)>> = criteria
        .iter()
        .map(|&criterion| (criterion, spread(sites, criterion)))
        .collect();

    sites
        .iter()
        .map(|site| {
            let scores = criteria
                .iter()
                .map(|&criterion| {
                    let bounds = spreads.get(&criterion).copied().flatten();
                    (criterion, normalise_value(site.raw(criterion), bounds, criterion))
                })
                .collect();
            NormalisedSite {
                site: site.clone(),
                scores,
            }
        })
        .collect()
}

/// Min and max of the finite present values for a criterion; `None` when
/// every site is missing it.
fn spread(sites: &[CandidateSite], criterion: Criterion) -> Option<(f64, f64)> {
    sites
        .iter()
        .filter_map(|site| site.raw(criterion))
        .filter(|value| value.is_finite())
        .fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

#[expect(
    clippy::float_arithmetic,
    reason = "min-max rescaling is the purpose of this function"
)]
fn normalise_value(raw: Option<f64>, bounds: Option<(f64, f64)>, criterion: Criterion) -> f64 {
    let raw = raw.filter(|value| value.is_finite());
    let (Some(value), Some((min, max))) = (raw, bounds) else {
        return NEUTRAL_SCORE;
    };
    let range = max - min;
    if range == 0.0 {
        return NEUTRAL_SCORE;
    }
    match criterion.direction() {
        Direction::HigherIsBetter => (value - min) / range,
        Direction::LowerIsBetter => (max - value) / range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sites_with(criterion: Criterion, values: &[Option<f64>]) -> Vec<CandidateSite> {
        values
            .iter()
            .zip(0_u64..)
            .map(|(value, id)| {
                let mut site = CandidateSite::new(id, format!("site-{id}"), 0.0, 0.0);
                site.set_value(criterion, *value);
                site
            })
            .collect()
    }

    fn score_of(batch: &[NormalisedSite], index: usize, criterion: Criterion) -> f64 {
        batch
            .get(index)
            .and_then(|site| site.scores.get(&criterion).copied())
            .expect("score present")
    }

    #[rstest]
    fn higher_is_better_maps_max_to_one() {
        let criterion = Criterion::PopulationDensity;
        let sites = sites_with(criterion, &[Some(100.0), Some(200.0), Some(300.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        assert_eq!(score_of(&batch, 0, criterion), 0.0);
        assert_eq!(score_of(&batch, 1, criterion), 0.5);
        assert_eq!(score_of(&batch, 2, criterion), 1.0);
    }

    #[rstest]
    fn lower_is_better_inverts_the_scale() {
        let criterion = Criterion::RiskLevel;
        let sites = sites_with(criterion, &[Some(1.0), Some(5.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        assert_eq!(score_of(&batch, 0, criterion), 1.0);
        assert_eq!(score_of(&batch, 1, criterion), 0.0);
    }

    #[rstest]
    fn zero_spread_is_neutral_for_every_site() {
        let criterion = Criterion::Accessibility;
        let sites = sites_with(criterion, &[Some(7.0), Some(7.0), Some(7.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        for index in 0..3 {
            assert_eq!(score_of(&batch, index, criterion), NEUTRAL_SCORE);
        }
    }

    #[rstest]
    fn missing_value_is_neutral_and_excluded_from_bounds() {
        let criterion = Criterion::Accessibility;
        let sites = sites_with(criterion, &[None, Some(10.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        // The only present value is both min and max, so it is neutral too.
        assert_eq!(score_of(&batch, 0, criterion), NEUTRAL_SCORE);
        assert_eq!(score_of(&batch, 1, criterion), NEUTRAL_SCORE);
    }

    #[rstest]
    fn nan_raw_value_is_treated_as_missing() {
        let criterion = Criterion::Accessibility;
        // Bypass the site setter to plant the NaN directly.
        let mut sites = sites_with(criterion, &[None, Some(10.0), Some(20.0)]);
        if let Some(site) = sites.first_mut() {
            site.accessibility = Some(f64::NAN);
        }
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        assert_eq!(score_of(&batch, 0, criterion), NEUTRAL_SCORE);
        assert_eq!(score_of(&batch, 1, criterion), 0.0);
        assert_eq!(score_of(&batch, 2, criterion), 1.0);
    }

    #[rstest]
    fn missing_values_do_not_distort_other_sites() {
        let criterion = Criterion::FacilityCapacity;
        let sites = sites_with(criterion, &[Some(0.0), None, Some(50.0), Some(100.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        assert_eq!(score_of(&batch, 0, criterion), 0.0);
        assert_eq!(score_of(&batch, 1, criterion), NEUTRAL_SCORE);
        assert_eq!(score_of(&batch, 2, criterion), 0.5);
        assert_eq!(score_of(&batch, 3, criterion), 1.0);
    }

    #[rstest]
    fn entirely_missing_criterion_is_neutral() {
        let criterion = Criterion::ServiceCoverage;
        let sites = sites_with(criterion, &[None, None]);
        let batch = normalise_batch(&sites, &BTreeSet::from([criterion]));

        assert_eq!(score_of(&batch, 0, criterion), NEUTRAL_SCORE);
        assert_eq!(score_of(&batch, 1, criterion), NEUTRAL_SCORE);
    }

    #[rstest]
    fn only_requested_criteria_are_scored() {
        let sites = sites_with(Criterion::RiskLevel, &[Some(1.0), Some(2.0)]);
        let batch = normalise_batch(&sites, &BTreeSet::from([Criterion::RiskLevel]));

        let first = batch.first().expect("first site");
        assert_eq!(first.scores.len(), 1);
        assert!(!first.scores.contains_key(&Criterion::Accessibility));
    }
}
