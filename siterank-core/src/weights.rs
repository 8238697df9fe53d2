//! Criterion weights: validated importance factors in `[0, +inf)`.
//!
//! The vector stores weights literally. A sum far from 1 is diagnosable
//! through [`WeightVector::sum`] and [`WeightVector::sum_is_balanced`] but
//! is never an error and is never renormalised: callers warn, scoring uses
//! the values as given, and a total score above 1 is possible when the
//! supplied weights sum above 1.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use crate::Criterion;

/// Permitted deviation of the weight sum from 1 before callers should warn.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Errors raised while validating criterion weights.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WeightError {
    /// A key did not name a recognised criterion.
    #[error("unknown criterion '{key}'")]
    UnknownCriterion {
        /// The offending key, verbatim.
        key: String,
    },
    /// A weight was negative.
    #[error("weight for {criterion} must be non-negative, got {value}")]
    Negative {
        /// Criterion carrying the offending weight.
        criterion: Criterion,
        /// The offending value.
        value: f64,
    },
    /// A weight was NaN or infinite.
    #[error("weight for {criterion} must be finite, got {value}")]
    NonFinite {
        /// Criterion carrying the offending weight.
        criterion: Criterion,
        /// The offending value.
        value: f64,
    },
}

/// Validated mapping from criterion to importance weight.
///
/// Criteria absent from the vector are not scored at all; a zero weight
/// keeps the criterion in the evaluation with no influence on totals.
///
/// # Examples
/// ```
/// use siterank_core::{Criterion, WeightVector};
///
/// let weights = WeightVector::validate([("risk_level", 0.4), ("accessibility", 0.6)])?;
/// assert_eq!(weights.weight(Criterion::RiskLevel), Some(0.4));
/// assert!(weights.sum_is_balanced());
/// # Ok::<(), siterank_core::WeightError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: BTreeMap<Criterion, f64>,
}

impl Default for WeightVector {
    /// The documented default vector used when the caller supplies nothing.
    fn default() -> Self {
        let weights = BTreeMap::from([
            (Criterion::PopulationDensity, 0.25),
            (Criterion::Accessibility, 0.20),
            (Criterion::RiskLevel, 0.15),
            (Criterion::FacilityCapacity, 0.20),
            (Criterion::ServiceCoverage, 0.20),
        ]);
        Self { weights }
    }
}

impl WeightVector {
    /// Validate string-keyed weight entries into a `WeightVector`.
    ///
    /// Later entries overwrite earlier ones for the same criterion.
    ///
    /// # Errors
    /// Returns [`WeightError`] when a key is outside the recognised
    /// criterion set or a value is negative or non-finite. The sum of the
    /// weights is deliberately not checked.
    pub fn validate<K, I>(entries: I) -> Result<Self, WeightError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut weights = BTreeMap::new();
        for (key, value) in entries {
            let criterion = Criterion::from_str(key.as_ref()).map_err(|_| {
                WeightError::UnknownCriterion {
                    key: key.as_ref().to_owned(),
                }
            })?;
            check_weight(criterion, value)?;
            weights.insert(criterion, value);
        }
        Ok(Self { weights })
    }

    /// Construct an empty vector; no criterion is scored until one is added.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Insert a weight while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`WeightError`] for a negative or non-finite value.
    pub fn with_weight(mut self, criterion: Criterion, value: f64) -> Result<Self, WeightError> {
        self.set_weight(criterion, value)?;
        Ok(self)
    }

    /// Insert or update a weight.
    ///
    /// # Errors
    /// Returns [`WeightError`] for a negative or non-finite value.
    pub fn set_weight(&mut self, criterion: Criterion, value: f64) -> Result<(), WeightError> {
        check_weight(criterion, value)?;
        self.weights.insert(criterion, value);
        Ok(())
    }

    /// Return the weight for a criterion, if present.
    #[must_use]
    pub fn weight(&self, criterion: Criterion) -> Option<f64> {
        self.weights.get(&criterion).copied()
    }

    /// Iterate over `(criterion, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.weights.iter().map(|(&criterion, &value)| (criterion, value))
    }

    /// Iterate over the criteria carried by the vector, in canonical order.
    pub fn criteria(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.weights.keys().copied()
    }

    /// Number of weighted criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether the vector carries no criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Nominal sum of the weights, surfaced so callers can warn on drift.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Report whether the sum lies within [`WEIGHT_SUM_TOLERANCE`] of 1.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "tolerance comparison on the diagnostic sum"
    )]
    pub fn sum_is_balanced(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

fn check_weight(criterion: Criterion, value: f64) -> Result<(), WeightError> {
    if !value.is_finite() {
        return Err(WeightError::NonFinite { criterion, value });
    }
    if value < 0.0 {
        return Err(WeightError::Negative { criterion, value });
    }
    Ok(())
}
