//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use polars::prelude::*;

use crate::{BoostError, Result};


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(data: &DataFrame, target: &[f64]) -> Result<()> {
    let (n_sample, n_feature) = data.shape();

    if n_sample != target.len() {
        return Err(BoostError::ShapeMismatch {
            what: "feature rows vs. target rows",
            expected: n_sample,
            actual: target.len(),
        });
    }

    // `data` must have at least one row and one feature.
    if n_sample == 0 || n_feature == 0 {
        return Err(BoostError::EmptySample { n_sample, n_feature });
    }
    Ok(())
}


/// Check the learning rate (shrinkage parameter).
#[inline(always)]
pub(crate) fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(BoostError::InvalidParameter {
            parameter: "learning_rate",
            value: learning_rate.to_string(),
            reason: "must be a finite number greater than zero",
        });
    }
    Ok(())
}


/// Check that a weak learner returned one finite prediction per row.
#[inline(always)]
pub(crate) fn check_predictions(
    name: &str,
    predictions: &[f64],
    n_sample: usize,
) -> Result<()>
{
    if predictions.len() != n_sample {
        return Err(BoostError::WeakLearner {
            name: name.to_string(),
            reason: format!(
                "returned {} predictions for {n_sample} rows",
                predictions.len(),
            ),
        });
    }

    if let Some(i) = predictions.iter().position(|p| !p.is_finite()) {
        return Err(BoostError::WeakLearner {
            name: name.to_string(),
            reason: format!("non-finite prediction at row {i}"),
        });
    }
    Ok(())
}
