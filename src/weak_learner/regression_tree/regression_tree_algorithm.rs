use polars::prelude::*;

use crate::{
    common::utils::column_values,
    BoostError,
    Result,
    WeakLearner,
};

use super::{
    builder::RegressionTreeBuilder,
    node::{Node, Tree, ROOT},
    split_rule::*,
    regression_tree_regressor::RegressionTreeRegressor,
};


/// An untrained CART regression tree with squared-error splitting.
///
/// A `RegressionTree` is a plain parameter set,
/// so cloning it is the cheapest way to get fresh learners.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use gradboost::prelude::*;
///
/// let data = df!("x" => &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let target = [0.0, 0.0, 1.0, 1.0];
///
/// let stump = RegressionTreeBuilder::new().max_depth(1).build();
/// let h = stump.fit(&data, &target).unwrap();
///
/// assert_eq!(h.predict_all(&data).unwrap(), vec![0.0, 0.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionTree {
    // The maximal depth of the output trees, `None` for unlimited.
    max_depth: Option<usize>,

    min_samples_split: usize,
    min_samples_leaf: usize,
}


impl Default for RegressionTree {
    fn default() -> Self {
        RegressionTreeBuilder::new().build()
    }
}


impl RegressionTree {
    #[inline]
    pub(super) fn from_components(
        max_depth: Option<usize>,
        min_samples_split: usize,
        min_samples_leaf: usize,
    ) -> Self
    {
        Self { max_depth, min_samples_split, min_samples_leaf, }
    }


    /// Set the maximum depth of the resulting tree.
    #[inline]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// Grows the tree from a work stack of `(node, rows, depth left)`.
    fn full_tree(
        &self,
        columns: &[Vec<f64>],
        target: &[f64],
        indices: Vec<usize>,
    ) -> Tree
    {
        let mut tree = Tree::new();
        let mut stack = vec![(ROOT, indices, self.max_depth)];

        while let Some((index, indices, depth)) = stack.pop() {
            match self.grow(columns, target, indices, depth) {
                Grown::Leaf(prediction) => {
                    tree.set(index, Node::leaf(prediction));
                },
                Grown::Branch(rule, lindices, rindices) => {
                    let left = tree.push_placeholder();
                    let right = tree.push_placeholder();
                    tree.set(index, Node::branch(rule, left, right));

                    let depth = depth.map(|d| d - 1);
                    stack.push((right, rindices, depth));
                    stack.push((left, lindices, depth));
                },
            }
        }
        tree
    }


    /// Decides whether the node holding `indices` is a leaf
    /// or splits it in two.
    fn grow(
        &self,
        columns: &[Vec<f64>],
        target: &[f64],
        indices: Vec<usize>,
        depth: Option<usize>,
    ) -> Grown
    {
        let n_items = indices.len() as f64;
        let prediction = indices.iter()
            .map(|&i| target[i])
            .sum::<f64>()
            / n_items;

        let sse = indices.iter()
            .map(|&i| (target[i] - prediction).powi(2))
            .sum::<f64>();

        if depth == Some(0)
            || indices.len() < self.min_samples_split
            || sse <= 0.0
        {
            return Grown::Leaf(prediction);
        }

        let Some(split) = best_split(
            columns, target, &indices, self.min_samples_leaf
        ) else {
            return Grown::Leaf(prediction);
        };


        // Split the train data for left/right childrens
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for i in indices.into_iter() {
            match split.rule.split(columns, i) {
                LR::Left  => { lindices.push(i); },
                LR::Right => { rindices.push(i); },
            }
        }

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return Grown::Leaf(prediction);
        }

        Grown::Branch(split.rule, lindices, rindices)
    }
}


enum Grown {
    Leaf(f64),
    Branch(Splitter, Vec<usize>, Vec<usize>),
}


impl WeakLearner for RegressionTree {
    type Hypothesis = RegressionTreeRegressor;


    fn name(&self) -> &str {
        "Regression Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let depth = self.max_depth
            .map_or_else(|| "unlimited".to_string(), |d| d.to_string());
        let info = Vec::from([
            ("Max depth", depth),
            ("Min samples to split", self.min_samples_split.to_string()),
            ("Min samples in a leaf", self.min_samples_leaf.to_string()),
        ]);
        Some(info)
    }


    fn fit(self, data: &DataFrame, target: &[f64])
        -> Result<Self::Hypothesis>
    {
        let (n_sample, n_feature) = data.shape();
        if n_sample != target.len() {
            return Err(BoostError::ShapeMismatch {
                what: "feature rows vs. target rows",
                expected: n_sample,
                actual: target.len(),
            });
        }
        if n_sample == 0 {
            return Err(BoostError::EmptySample { n_sample, n_feature });
        }
        let n_invalid = target.iter().filter(|y| !y.is_finite()).count();
        if n_invalid > 0 {
            return Err(BoostError::InvalidValues {
                column: "target".into(),
                n_invalid,
            });
        }

        let columns = data.get_columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>>>()?;
        let feature_names = data.get_column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        let indices = (0..n_sample).collect::<Vec<_>>();
        let tree = self.full_tree(&columns, target, indices);

        Ok(RegressionTreeRegressor::new(tree, feature_names))
    }
}
