//! Multi-criteria decision analysis for candidate evacuation sites.
//!
//! The crate turns raw per-site attributes and a validated weight vector
//! into a ranked, cached, re-evaluatable result set:
//!
//! - [`normalise_batch`] rescales each raw criterion column into `[0, 1]`
//!   relative to the batch's own min/max, honouring the criterion's
//!   direction policy and imputing missing values to a neutral score.
//! - [`score_batch`] combines the normalised columns into a weighted total
//!   per site and assigns a dense rank with deterministic tie-breaking.
//! - [`SiteEvaluator`] composes the two behind a single-slot
//!   [`EvaluationCache`] keyed by a structured [`Fingerprint`] of the
//!   dataset identity and weight vector, so unchanged inputs skip
//!   recomputation entirely.
//!
//! Data acquisition and persistence stay outside: callers hand in a slice
//! of [`CandidateSite`](siterank_core::CandidateSite) records and take the
//! ranked batch away.

#![forbid(unsafe_code)]

mod cache;
mod evaluator;
mod normalise;
mod score;

pub use cache::{DatasetId, EvaluationCache, Fingerprint};
pub use evaluator::SiteEvaluator;
pub use normalise::{NEUTRAL_SCORE, NormalisedSite, normalise_batch};
pub use score::score_batch;
