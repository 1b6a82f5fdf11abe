//! Exports the boosting algorithm, weak learners, and traits.
//!
pub use crate::booster::{
    // Booster trait
    Booster,

    // Regression -------------------------------
    GradientBoost,
    BoostParams,
    State,
};


pub use crate::weak_learner::{
    // Weak Learner trait
    WeakLearner,

    // Regression tree
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};


pub use crate::hypothesis::{
    Regressor,
    AdditiveModel,
    CombinedRegressor,
};


pub use crate::common::{
    LossFunction,
    GBMLoss,
    FnLoss,
};


pub use crate::research::{
    Logger,
    CurrentHypothesis,
};


pub use crate::error::BoostError;
