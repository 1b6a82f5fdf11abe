//! Defines some common functions used in this library.

/// Defines loss function trait and its instances.
pub mod loss_functions;

/// Frame-to-vector helpers and the recorded feature schema.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;

pub use loss_functions::{LossFunction, GBMLoss, FnLoss};
pub use utils::FeatureSchema;
