//! Provides `WeakLearner` trait.
use polars::prelude::*;

use crate::{Regressor, Result};


/// The trait [`WeakLearner`] defines the capability
/// a boosting algorithm expects from its weak learners.
///
/// A value of a type implementing [`WeakLearner`] is an **untrained**
/// learner. [`WeakLearner::fit`] consumes it and returns the trained
/// hypothesis, so a learner is never fitted twice.
/// Boosters obtain fresh learners from a factory,
/// any `FnMut() -> W` such as a closure or `RegressionTree::default`.
///
/// # Required Methods
/// - [`WeakLearner::name`]
/// - [`WeakLearner::fit`]
/// - [`WeakLearner::info`] ... optional.
pub trait WeakLearner {
    /// The hypothesis returned by [`WeakLearner::fit`].
    type Hypothesis: Regressor;


    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the information of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Trains `self` on `(data, target)`.
    /// `target` holds one value per row of `data`.
    fn fit(self, data: &DataFrame, target: &[f64])
        -> Result<Self::Hypothesis>;
}
