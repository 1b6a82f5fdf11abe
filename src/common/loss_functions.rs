use serde::{Serialize, Deserialize};

use crate::{BoostError, Result};


/// This trait defines the loss functions.
///
/// Only the pointwise loss and its derivative
/// with respect to the prediction are required.
pub trait LossFunction {
    /// The name of the loss function.
    fn name(&self) -> &str;


    /// Loss value for a single point.
    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64;


    /// Derivative of the loss w.r.t. `prediction` at a single point.
    fn gradient_at_point(&self, prediction: f64, true_value: f64) -> f64;


    /// Checks the parameters of the loss.
    /// Boosters call this before they accept the loss.
    fn validate(&self) -> Result<()> {
        Ok(())
    }


    /// Mean loss over the given points.
    fn eval(&self, predictions: &[f64], target: &[f64]) -> f64 {
        let n_items = predictions.len();

        assert_eq!(n_items, target.len());

        if n_items == 0 { return 0.0; }

        predictions.iter()
            .zip(target)
            .map(|(&p, &y)| self.eval_at_point(p, y))
            .sum::<f64>()
            / n_items as f64
    }


    /// Gradient vector at the current point.
    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64> {
        assert_eq!(predictions.len(), target.len());

        predictions.iter()
            .zip(target)
            .map(|(&p, &y)| self.gradient_at_point(p, y))
            .collect()
    }
}


/// Some well-known regression losses.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum GBMLoss {
    /// `L1`-loss.
    /// This loss function is also known as
    /// **Least Absolute Deviation (LAD)**.
    L1,

    /// `L2`-loss, `(y - p)^2`.
    /// This loss function is also known as
    /// **Mean Squared Error (MSE)**.
    #[default]
    L2,

    /// Huber loss with parameter `delta`.
    /// Huber loss maps the residual `z = p - y` to
    /// `0.5 * z.powi(2)` if `z.abs() <= delta`,
    /// `delta * (z.abs() - 0.5 * delta)`, otherwise.
    Huber(f64),
}


impl LossFunction for GBMLoss {
    fn name(&self) -> &str {
        match self {
            Self::L1 => "L1 loss",
            Self::L2 => "L2 loss",
            Self::Huber(_) => "Huber loss",
        }
    }


    fn validate(&self) -> Result<()> {
        match self {
            Self::Huber(delta) if !delta.is_finite() || *delta <= 0.0 => {
                Err(BoostError::InvalidParameter {
                    parameter: "Huber delta",
                    value: delta.to_string(),
                    reason: "must be a finite number greater than zero",
                })
            },
            _ => Ok(()),
        }
    }


    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        match self {
            Self::L1 => (true_value - prediction).abs(),
            Self::L2 => (true_value - prediction).powi(2),
            Self::Huber(delta) => {
                let diff = (prediction - true_value).abs();
                if diff <= *delta {
                    0.5 * diff.powi(2)
                } else {
                    delta * (diff - 0.5 * delta)
                }
            },
        }
    }


    fn gradient_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        match self {
            Self::L1 => {
                let diff = prediction - true_value;
                if diff == 0.0 { 0.0 } else { diff.signum() }
            },
            Self::L2 => 2.0 * (prediction - true_value),
            Self::Huber(delta) => {
                let diff = prediction - true_value;
                if diff.abs() <= *delta {
                    diff
                } else {
                    delta * diff.signum()
                }
            },
        }
    }
}


/// A loss built from two plain functions,
/// `loss(target, prediction)` and `gradient(target, prediction)`.
///
/// ```
/// use gradboost::prelude::*;
///
/// let loss = FnLoss::new(
///     "quartic",
///     |y: f64, p: f64| (y - p).powi(4),
///     |y: f64, p: f64| 4.0 * (p - y).powi(3),
/// );
/// assert_eq!(loss.eval_at_point(3.0, 1.0), 16.0);
/// ```
#[derive(Clone)]
pub struct FnLoss<L, G> {
    name: String,
    loss: L,
    gradient: G,
}


impl<L, G> FnLoss<L, G>
    where L: Fn(f64, f64) -> f64,
          G: Fn(f64, f64) -> f64,
{
    /// Wrap a pointwise loss and its derivative w.r.t. the prediction.
    pub fn new<S: Into<String>>(name: S, loss: L, gradient: G) -> Self {
        Self { name: name.into(), loss, gradient }
    }
}


impl<L, G> LossFunction for FnLoss<L, G>
    where L: Fn(f64, f64) -> f64,
          G: Fn(f64, f64) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }


    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        (self.loss)(true_value, prediction)
    }


    fn gradient_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        (self.gradient)(true_value, prediction)
    }
}
