//! Provides some tools for observing boosting algorithms round by round.

/// Defines `Logger` and `CurrentHypothesis`.
pub mod logger;

pub use logger::{
    Logger,
    CurrentHypothesis,
};
