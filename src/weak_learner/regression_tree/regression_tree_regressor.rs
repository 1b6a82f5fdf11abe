use polars::prelude::*;
use rayon::prelude::*;

use serde::{
    Serialize,
    Deserialize,
};

use crate::{
    common::utils::column_values,
    Regressor,
    Result,
};
use super::node::Tree;


/// Regression Tree regressor.
/// This struct is a wrapper of the trained tree
/// that remembers the names of the features it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTreeRegressor {
    tree: Tree,
    feature_names: Vec<String>,
}


impl RegressionTreeRegressor {
    #[inline]
    pub(super) fn new(tree: Tree, feature_names: Vec<String>) -> Self {
        Self { tree, feature_names }
    }


    /// Number of splits on the longest root-to-leaf path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }


    /// Number of leaves.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.tree.n_leaves()
    }
}


impl Regressor for RegressionTreeRegressor {
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        // Only the prefix of features up to the last one in use is read.
        let used = self.tree.max_feature().map_or(0, |j| j + 1);
        let columns = self.feature_names[..used].iter()
            .map(|name| column_values(data.column(name)?))
            .collect::<Result<Vec<_>>>()?;

        let predictions = (0..data.height()).into_par_iter()
            .map(|row| self.tree.predict(&columns, row))
            .collect::<Vec<_>>();
        Ok(predictions)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoostError, RegressionTree, WeakLearner};

    #[test]
    fn features_are_looked_up_by_name() {
        let train = df!(
            "a" => &[1.0, 2.0, 3.0, 4.0],
            "b" => &[0.0, 0.0, 0.0, 0.0]
        ).unwrap();
        let h = RegressionTree::default()
            .fit(&train, &[1.0, 1.0, 7.0, 7.0])
            .unwrap();

        let test = df!(
            "b" => &[5.0, 5.0],
            "a" => &[0.5, 10.0]
        ).unwrap();
        assert_eq!(h.predict_all(&test).unwrap(), vec![1.0, 7.0]);
    }


    #[test]
    fn missing_feature_is_an_error() {
        let train = df!("a" => &[1.0, 2.0]).unwrap();
        let h = RegressionTree::default().fit(&train, &[0.0, 1.0]).unwrap();
        let test = df!("z" => &[1.0]).unwrap();
        assert!(matches!(
            h.predict_all(&test),
            Err(BoostError::Polars(_))
        ));
    }


    #[test]
    fn serde_round_trip_keeps_predictions() {
        let train = df!("a" => &[1.0, 2.0, 3.0]).unwrap();
        let h = RegressionTree::default()
            .fit(&train, &[3.0, 1.0, 2.0])
            .unwrap();
        let json = serde_json::to_string(&h).unwrap();
        let restored: RegressionTreeRegressor = serde_json::from_str(&json)
            .unwrap();
        assert_eq!(h, restored);
    }
}
