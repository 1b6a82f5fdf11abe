//! Error type shared by every fallible operation in this crate.
//!
//! Nothing here is recoverable at the iteration level:
//! an error returned from [`GradientBoost::fit`](crate::GradientBoost::fit)
//! leaves the ensemble unusable, and the caller should drop it.
use polars::prelude::PolarsError;
use thiserror::Error;

use std::io;


/// Errors raised while configuring, fitting, or evaluating an ensemble.
#[derive(Error, Debug)]
pub enum BoostError {
    /// A hyperparameter is out of its admissible range.
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// What the parameter must satisfy.
        reason: &'static str,
    },

    /// Two row-aligned quantities disagree in length.
    #[error("Shape mismatch ({what}): expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Which pair of quantities was compared.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// The feature columns differ from the ones seen by `fit`.
    #[error("Feature schema mismatch: expected [{expected}], got [{actual}]")]
    SchemaMismatch {
        /// Schema recorded at fit time.
        expected: String,
        /// Schema of the offending frame.
        actual: String,
    },

    /// The training frame has no rows or no feature columns.
    #[error("Empty sample: {n_sample} rows, {n_feature} features")]
    EmptySample {
        /// Number of rows.
        n_sample: usize,
        /// Number of feature columns.
        n_feature: usize,
    },

    /// The target frame has no usable numeric column.
    #[error("Invalid target: {0}")]
    MissingTarget(String),

    /// A numeric column holds nulls.
    #[error("Column `{column}` has {n_null} missing values")]
    MissingValues {
        /// Column name.
        column: String,
        /// Number of nulls found.
        n_null: usize,
    },

    /// A column holds values that are not finite numbers,
    /// e.g. unparsable strings, `NaN` or infinities.
    #[error("Column `{column}` has {n_invalid} values that are not finite numbers")]
    InvalidValues {
        /// Column name.
        column: String,
        /// Number of offending values.
        n_invalid: usize,
    },

    /// A weak learner broke the `fit`/`predict` contract.
    #[error("Weak learner `{name}` violated its contract: {reason}")]
    WeakLearner {
        /// Name reported by the weak learner.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// The operation needs a fully fitted ensemble.
    #[error("`{0}` requires a fitted ensemble")]
    NotFitted(&'static str),

    /// A boosting stage was invoked out of order.
    #[error("`{0}` called out of order")]
    OutOfOrder(&'static str),

    /// `fit` was called on an ensemble that was already (being) fitted.
    #[error("`fit` can be called only once per ensemble")]
    AlreadyFitted,

    /// Errors from the dataframe layer.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// File I/O errors.
    #[error(transparent)]
    Io(#[from] io::Error),
}


/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BoostError>;
