mod gbm;
mod params;

pub use gbm::{GradientBoost, State};
pub use params::{BoostParams, DEFAULT_LEARNING_RATE, DEFAULT_N_ITER};
