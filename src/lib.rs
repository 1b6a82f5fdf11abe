#![warn(missing_docs)]

//!
//! A crate that provides functional gradient boosting for regression.
//!
//! [`GradientBoost`] builds an additive model
//! `F(x) = f_0(x) + lr * (h_1(x) + ... + h_T(x))`:
//!
//! - `f_0` is a weak learner fitted on the target itself,
//! - each `h_t` is a fresh weak learner fitted on the negative gradient
//!   of the loss at the prediction of the model built so far,
//! - `lr` is the learning rate (shrinkage).
//!   It damps every correction but never the base model.
//!
//! Weak learners are pluggable.
//! Anything implementing [`WeakLearner`] can be boosted;
//! this crate ships a CART [`RegressionTree`].
//! Losses are pluggable as well through [`LossFunction`];
//! the default is the squared loss.
//!
//! Features and targets are [`polars`] data frames.
//!
//! ```
//! use polars::prelude::*;
//! use gradboost::prelude::*;
//!
//! let x = (0..50).map(|i| i as f64).collect::<Vec<_>>();
//! let y = x.iter().map(|x| 2.0 * x + 1.0).collect::<Vec<_>>();
//! let data = df!("x" => x).unwrap();
//! let target = df!("y" => y.clone()).unwrap();
//!
//! let mut gbm = GradientBoost::init(20, 0.5).unwrap();
//! gbm.fit(&data, &target, RegressionTree::default).unwrap();
//!
//! assert_eq!(gbm.predict(&data).unwrap(), y);
//! ```

pub mod error;
pub mod common;
pub mod booster;
pub mod hypothesis;
pub mod weak_learner;
pub mod research;
pub mod prelude;


pub use error::{BoostError, Result};

pub use booster::{
    Booster,
    GradientBoost,
    BoostParams,
    State,
};

pub use common::{
    LossFunction,
    GBMLoss,
    FnLoss,
    FeatureSchema,
};

pub use hypothesis::{
    Regressor,
    AdditiveModel,
    CombinedRegressor,
};

pub use weak_learner::{
    WeakLearner,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};

pub use research::{
    Logger,
    CurrentHypothesis,
};
