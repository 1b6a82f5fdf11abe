use serde::{Serialize, Deserialize};

use crate::{common::checker, Result};


/// Number of boosting rounds set as default.
pub const DEFAULT_N_ITER: usize = 100;
/// Shrinkage parameter set as default.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;


/// Hyperparameters of [`GradientBoost`](crate::GradientBoost).
///
/// ```
/// use gradboost::BoostParams;
///
/// let params = BoostParams::from_json(
///     r#"{ "n_iter": 20, "learning_rate": 0.5 }"#
/// ).unwrap();
/// assert_eq!(params.n_iter, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoostParams {
    /// Number of correction models to fit.
    pub n_iter: usize,
    /// Shrinkage applied to each correction model.
    pub learning_rate: f64,
}


impl Default for BoostParams {
    fn default() -> Self {
        Self {
            n_iter: DEFAULT_N_ITER,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}


impl BoostParams {
    /// Construct validated parameters.
    pub fn new(n_iter: usize, learning_rate: f64) -> Result<Self> {
        let params = Self { n_iter, learning_rate };
        params.validate()?;
        Ok(params)
    }


    /// Fails unless `learning_rate` is finite and positive.
    /// `n_iter == 0` is allowed and yields the base model alone.
    pub fn validate(&self) -> Result<()> {
        checker::check_learning_rate(self.learning_rate)
    }


    /// Parse and validate parameters from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }


    /// Serialize the parameters as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoostError;

    #[test]
    fn json_round_trip() {
        let params = BoostParams::new(7, 0.25).unwrap();
        let json = params.to_json().unwrap();
        assert_eq!(BoostParams::from_json(&json).unwrap(), params);
    }


    #[test]
    fn invalid_learning_rate_in_json() {
        let err = BoostParams::from_json(
            r#"{ "n_iter": 3, "learning_rate": -0.5 }"#
        ).unwrap_err();
        assert!(matches!(err, BoostError::InvalidParameter { .. }));
    }


    #[test]
    fn unknown_fields_are_rejected() {
        let err = BoostParams::from_json(
            r#"{ "n_iter": 3, "learning_rate": 0.5, "max_depth": 2 }"#
        ).unwrap_err();
        assert!(matches!(err, BoostError::Json(_)));
    }


    #[test]
    fn negative_iteration_count_does_not_parse() {
        assert!(BoostParams::from_json(
            r#"{ "n_iter": -1, "learning_rate": 0.5 }"#
        ).is_err());
    }
}
