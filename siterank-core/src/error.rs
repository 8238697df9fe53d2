//! Errors raised while evaluating a batch of candidate sites.

use thiserror::Error;

/// Errors returned by batch evaluation.
///
/// Per-site missing values are never errors: they are imputed to a neutral
/// score during normalisation. These variants cover the two dataset-level
/// conditions no imputation can recover from.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The input batch held zero sites.
    #[error("cannot evaluate an empty batch of sites")]
    EmptyBatch,
    /// No site in the batch carried a value for any recognised criterion.
    #[error("no recognised criterion values present in the dataset")]
    AllCriteriaMissing,
}
