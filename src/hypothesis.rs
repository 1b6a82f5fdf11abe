//! The core library for `Hypothesis` traits.

pub(crate) mod hypothesis_traits;
pub(crate) mod additive_model;


pub use hypothesis_traits::Regressor;

pub use additive_model::{
    AdditiveModel,
    CombinedRegressor,
};
