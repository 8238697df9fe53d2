//! Facade crate for the siterank evacuation-site ranking engine.
//!
//! Re-exports the domain types from `siterank-core` and the evaluation
//! pipeline from `siterank-mcda` so downstream collaborators depend on a
//! single crate.
//!
//! # Examples
//!
//! ```
//! use siterank_engine::{
//!     CandidateSite, Criterion, DatasetId, SiteEvaluator, WeightVector,
//! };
//!
//! let sites = vec![
//!     CandidateSite::new(1, "Central School", 14.59, 120.98)
//!         .with_value(Criterion::PopulationDensity, 3200.0)
//!         .with_value(Criterion::RiskLevel, 2.0),
//!     CandidateSite::new(2, "City Gym", 14.61, 121.00)
//!         .with_value(Criterion::PopulationDensity, 1800.0)
//!         .with_value(Criterion::RiskLevel, 4.0),
//! ];
//!
//! let mut evaluator = SiteEvaluator::new();
//! let ranked = evaluator.evaluate(
//!     &DatasetId::new("sites.csv", sites.len()),
//!     &sites,
//!     &WeightVector::default(),
//! )?;
//! assert_eq!(ranked.sites().first().map(|s| s.site.id), Some(1));
//! # Ok::<(), siterank_engine::EvaluationError>(())
//! ```

#![forbid(unsafe_code)]

pub use siterank_core::{
    CandidateSite, Criterion, CsvError, Direction, EvaluatedSite, EvaluationError,
    RECOMMENDATION_THRESHOLD, RankedBatch, WEIGHT_SUM_TOLERANCE, WeightError, WeightVector,
    export,
};
pub use siterank_mcda::{
    DatasetId, EvaluationCache, Fingerprint, NEUTRAL_SCORE, NormalisedSite, SiteEvaluator,
    normalise_batch, score_batch,
};
