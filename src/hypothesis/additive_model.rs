use polars::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    common::{checker, FeatureSchema},
    Regressor,
    Result,
};


/// An additive model that takes references of
/// the base model and the correction models.
///
/// It predicts
/// `base(x) + learning_rate * (h_1(x) + h_2(x) + ... + h_T(x))`,
/// accumulating corrections in the order of `models`.
/// The base model is **not** shrunk.
#[derive(Debug)]
pub struct AdditiveModel<'a, H> {
    /// Stage-0 model.
    pub base: &'a H,
    /// Shrinkage applied to each correction model.
    pub learning_rate: f64,
    /// Correction models in fitting order.
    pub models: &'a [H],
}


impl<H> Clone for AdditiveModel<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}


impl<H> Copy for AdditiveModel<'_, H> {}


impl<'a, H> AdditiveModel<'a, H> {
    /// Construct a new `AdditiveModel` from the given parts.
    #[inline]
    pub fn new(base: &'a H, learning_rate: f64, models: &'a [H]) -> Self {
        Self { base, learning_rate, models, }
    }
}


impl<H> Regressor for AdditiveModel<'_, H>
    where H: Regressor,
{
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        let n_sample = data.height();

        // `predict_all` hands over an owned vector,
        // so accumulating into it never touches the model's state.
        let mut predictions = self.base.predict_all(data)?;
        checker::check_predictions("base model", &predictions, n_sample)?;

        let lr = self.learning_rate;
        for (t, h) in self.models.iter().enumerate() {
            let correction = h.predict_all(data)?;
            checker::check_predictions(
                &format!("correction model #{}", t + 1),
                &correction,
                n_sample,
            )?;

            predictions.par_iter_mut()
                .zip(correction)
                .for_each(|(p, q)| { *p += lr * q; });
        }
        Ok(predictions)
    }
}


/// A fitted additive model detached from the booster.
/// You can read/write this struct by `Serde` trait.
///
/// Unlike [`AdditiveModel`], this struct remembers
/// the feature schema seen at fit time and rejects other frames.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CombinedRegressor<H> {
    /// Stage-0 model.
    pub base_model: H,
    /// Shrinkage applied to each correction model.
    pub learning_rate: f64,
    /// Correction models in fitting order.
    pub models: Vec<H>,
    schema: FeatureSchema,
}


impl<H> CombinedRegressor<H> {
    pub(crate) fn new(
        base_model: H,
        learning_rate: f64,
        models: Vec<H>,
        schema: FeatureSchema,
    ) -> Self
    {
        Self { base_model, learning_rate, models, schema, }
    }


    /// Borrow `self` as an [`AdditiveModel`].
    #[inline]
    pub fn as_additive(&self) -> AdditiveModel<'_, H> {
        AdditiveModel::new(&self.base_model, self.learning_rate, &self.models)
    }


    /// The feature schema this model was trained on.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }


    /// Decompose into the base model and the correction models.
    #[inline]
    pub fn decompose(self) -> (H, Vec<H>) {
        (self.base_model, self.models)
    }
}


impl<H> Regressor for CombinedRegressor<H>
    where H: Regressor,
{
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        self.schema.check(data)?;
        self.as_additive().predict_all(data)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoostError;

    // Predicts `scale * x` for the first column.
    struct Scale(f64);

    impl Regressor for Scale {
        fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
            let x = crate::common::utils::column_values(
                &data.get_columns()[0]
            )?;
            Ok(x.into_iter().map(|x| self.0 * x).collect())
        }
    }

    struct Short;

    impl Regressor for Short {
        fn predict_all(&self, _data: &DataFrame) -> Result<Vec<f64>> {
            Ok(vec![0.0])
        }
    }


    #[test]
    fn base_is_not_shrunk() {
        let data = df!("x" => &[1.0, 2.0]).unwrap();
        let base = Scale(1.0);
        let models = [Scale(10.0), Scale(20.0)];
        let f = AdditiveModel::new(&base, 0.5, &models);

        // 1x + 0.5 * (10x + 20x) = 16x
        assert_eq!(f.predict_all(&data).unwrap(), vec![16.0, 32.0]);
    }


    #[test]
    fn no_corrections_means_base_prediction() {
        let data = df!("x" => &[3.0, -1.0]).unwrap();
        let base = Scale(2.0);
        let f = AdditiveModel::<Scale>::new(&base, 0.1, &[]);
        assert_eq!(f.predict_all(&data).unwrap(), vec![6.0, -2.0]);
    }


    #[test]
    fn short_prediction_is_a_contract_violation() {
        let data = df!("x" => &[1.0, 2.0]).unwrap();
        let f = AdditiveModel::<Short>::new(&Short, 1.0, &[]);
        assert!(matches!(
            f.predict_all(&data),
            Err(BoostError::WeakLearner { .. })
        ));
    }


    #[test]
    fn combined_regressor_checks_schema() {
        let train = df!("x" => &[1.0, 2.0]).unwrap();
        let other = df!("z" => &[1.0, 2.0]).unwrap();
        let f = CombinedRegressor::new(
            Scale(1.0), 1.0, vec![Scale(1.0)], FeatureSchema::of(&train)
        );
        assert_eq!(f.predict_all(&train).unwrap(), vec![2.0, 4.0]);
        assert!(matches!(
            f.predict_all(&other),
            Err(BoostError::SchemaMismatch { .. })
        ));
    }
}
