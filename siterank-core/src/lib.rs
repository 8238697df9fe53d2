//! Core domain types for the siterank engine.
//!
//! The crate defines the vocabulary shared by every collaborator: the fixed
//! criterion set with its direction policy, candidate sites with explicit
//! optional raw values, validated weight vectors, evaluated results, and the
//! flat CSV surface those results cross on their way to external tools.
//! The analytical work itself lives in `siterank-mcda`.

#![forbid(unsafe_code)]

mod criterion;
mod error;
mod evaluated;
pub mod export;
mod site;
mod weights;

pub use criterion::{Criterion, Direction};
pub use error::EvaluationError;
pub use evaluated::{EvaluatedSite, RECOMMENDATION_THRESHOLD, RankedBatch};
pub use export::CsvError;
pub use site::CandidateSite;
pub use weights::{WEIGHT_SUM_TOLERANCE, WeightError, WeightVector};
