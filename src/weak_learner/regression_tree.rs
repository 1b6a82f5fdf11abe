/// These file defines the regression tree producer.
pub mod regression_tree_algorithm;
/// This file defines the regression tree regressor.
pub mod regression_tree_regressor;

/// Regression Tree builder.
pub mod builder;

mod node;
mod split_rule;


pub use regression_tree_algorithm::RegressionTree;
pub use regression_tree_regressor::RegressionTreeRegressor;
pub use builder::RegressionTreeBuilder;
