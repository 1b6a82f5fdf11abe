use super::regression_tree_algorithm::RegressionTree;


/// The minimal number of rows a node needs to be split, by default.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
/// The minimal number of rows in a leaf, by default.
pub const DEFAULT_MIN_SAMPLES_LEAF: usize = 1;


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```
/// use gradboost::prelude::*;
///
/// let weak_learner = RegressionTreeBuilder::new()
///     .max_depth(2)
///     .min_samples_leaf(5)
///     .build();
/// assert_eq!(weak_learner.name(), "Regression Tree");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionTreeBuilder {
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
}


impl Default for RegressionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl RegressionTreeBuilder {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// By default,
    /// `RegressionTreeBuilder` sets the parameters as follows;
    /// ```text
    /// max_depth: unlimited,
    /// min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT == 2,
    /// min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF == 1,
    /// ```
    /// so the resulting tree grows until every leaf is pure.
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF,
        }
    }


    /// Specify the maximal depth of the tree.
    /// `max_depth(1)` yields a regression stump,
    /// `max_depth(0)` a constant predictor.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// A node with fewer rows than this becomes a leaf.
    pub fn min_samples_split(mut self, n_sample: usize) -> Self {
        self.min_samples_split = n_sample.max(2);
        self
    }


    /// Each child of a split keeps at least this many rows.
    pub fn min_samples_leaf(mut self, n_sample: usize) -> Self {
        self.min_samples_leaf = n_sample.max(1);
        self
    }


    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> RegressionTree {
        RegressionTree::from_components(
            self.max_depth, self.min_samples_split, self.min_samples_leaf,
        )
    }
}
