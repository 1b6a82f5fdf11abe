//! Provides the gradient boosting algorithm.

mod core;

mod gradient_boost;


/// Booster trait
pub use self::core::Booster;

// ------------------------------------------------
// Regression
pub use self::gradient_boost::{
    GradientBoost,
    State,
    BoostParams,
    DEFAULT_LEARNING_RATE,
    DEFAULT_N_ITER,
};
