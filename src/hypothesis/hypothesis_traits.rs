use polars::prelude::*;

use crate::Result;


/// A trait that defines the behavor of regressor.
/// You only need to implement `predict_all` method.
///
/// Implementors must return a freshly allocated vector
/// with one prediction per row of `data`.
/// Callers are free to mutate it.
pub trait Regressor {
    /// Predicts the target values of every row of `data`.
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>>;
}


impl<R> Regressor for Box<R>
    where R: Regressor + ?Sized,
{
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        (**self).predict_all(data)
    }
}


impl<R> Regressor for &R
    where R: Regressor + ?Sized,
{
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        (**self).predict_all(data)
    }
}
