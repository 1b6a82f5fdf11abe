//! Provides Gradient Boosting Machine ([`GradientBoost`]) by Friedman, 2001.
use log::{debug, info};
use polars::prelude::*;
use rayon::prelude::*;

use crate::{
    common::{
        checker,
        utils,
        FeatureSchema,
        GBMLoss,
        LossFunction,
    },
    research::CurrentHypothesis,
    AdditiveModel,
    BoostError,
    BoostParams,
    Booster,
    CombinedRegressor,
    Regressor,
    Result,
    WeakLearner,
};

use std::ops::ControlFlow;


/// Lifecycle of a [`GradientBoost`].
///
/// `fit` moves an ensemble from `Uninitialized` to `Fitted`.
/// An ensemble whose `fit` failed stays in `Fitting`
/// and rejects both `fit` and `predict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, not yet fitted.
    Uninitialized,
    /// Inside `fit`, or `fit` failed.
    Fitting,
    /// All rounds completed.
    Fitted,
}


/// The Gradient Boosting Machine proposed in the following paper:
///
/// [Jerome H. Friedman, 2001 - Greedy Function Approximation: A Gradient Boosting Machine](https://projecteuclid.org/journals/annals-of-statistics/volume-29/issue-5/Greedy-function-approximation-A-gradient-boostingmachine/10.1214/aos/1013203451.full)
///
/// Gradient Boosting Machine, GBM for shorthand, is a boosting algorithm
/// that minimizes the training loss.
/// GBM regards the boosting protocol as the gradient descent
/// over some functional space.
///
/// This implementation first fits a **base model** on the target itself.
/// Each of the following `n_iter` rounds fits a fresh weak learner
/// on the negative gradient of the loss at the current prediction,
/// and adds `learning_rate` times its prediction.
/// The base model is not shrunk.
///
/// # Example
/// The following code shows a small example
/// for running [`GradientBoost`].
///
/// ```
/// use polars::prelude::*;
/// use gradboost::prelude::*;
///
/// let x = (0..50).map(|i| i as f64 / 10.0).collect::<Vec<_>>();
/// let y = x.iter().map(|x| 2.0 * x + 1.0).collect::<Vec<_>>();
/// let data = df!("x" => x).unwrap();
/// let target = df!("y" => y).unwrap();
///
/// // 20 rounds of depth-2 trees, each shrunk by `0.5`.
/// let mut gbm = GradientBoost::init(20, 0.5).unwrap();
/// gbm.fit(&data, &target, || RegressionTree::default().max_depth(2))
///     .unwrap();
///
/// let predictions = gbm.predict(&data).unwrap();
/// assert_eq!(predictions.len(), 50);
/// assert_eq!(gbm.iteration_losses().len(), 20);
/// ```
pub struct GradientBoost<H, L = GBMLoss> {
    // Number of correction rounds.
    n_iter: usize,

    // Shrinkage on every correction model.
    learning_rate: f64,

    // Some struct that implements `LossFunction` trait
    loss: L,

    // Stage-0 model, fitted on the target itself.
    base_model: Option<H>,

    // Hypotheses obtained by the weak-learner.
    models: Vec<H>,

    // Mean training loss after each round.
    losses: Vec<f64>,

    // Columns seen by `fit`.
    schema: Option<FeatureSchema>,

    // Name of the weak learner, for `info`.
    weak_learner: Option<String>,

    n_sample: usize,

    // Flattened target, alive only while fitting.
    target: Vec<f64>,

    // A prediction vector at a state, alive only while fitting.
    predictions: Vec<f64>,

    state: State,
}


impl<H> GradientBoost<H, GBMLoss> {
    /// Initialize the `GradientBoost` with the squared loss.
    ///
    /// Fails if `learning_rate` is not a finite positive number.
    /// `n_iter == 0` is allowed;
    /// the ensemble then predicts with the base model alone.
    pub fn init(n_iter: usize, learning_rate: f64) -> Result<Self> {
        Self::init_with_loss(n_iter, learning_rate, GBMLoss::L2)
    }


    /// Initialize the `GradientBoost` from [`BoostParams`].
    pub fn from_params(params: &BoostParams) -> Result<Self> {
        Self::init(params.n_iter, params.learning_rate)
    }
}


impl<H, L> GradientBoost<H, L>
    where L: LossFunction,
{
    /// Initialize the `GradientBoost` with the given loss.
    ///
    /// Fails if `learning_rate` is not a finite positive number
    /// or if `loss` rejects its own parameters.
    pub fn init_with_loss(n_iter: usize, learning_rate: f64, loss: L)
        -> Result<Self>
    {
        checker::check_learning_rate(learning_rate)?;
        loss.validate()?;

        Ok(Self {
            n_iter,
            learning_rate,
            loss,

            base_model: None,
            models: Vec::new(),
            losses: Vec::new(),

            schema: None,
            weak_learner: None,
            n_sample: 0,

            target: Vec::new(),
            predictions: Vec::new(),

            state: State::Uninitialized,
        })
    }


    /// Replace the loss function.
    ///
    /// Only an ensemble that has not started fitting accepts a new loss;
    /// otherwise this fails with [`BoostError::AlreadyFitted`].
    pub fn loss<M>(self, loss: M) -> Result<GradientBoost<H, M>>
        where M: LossFunction,
    {
        if self.state != State::Uninitialized {
            return Err(BoostError::AlreadyFitted);
        }
        GradientBoost::init_with_loss(self.n_iter, self.learning_rate, loss)
    }
}


impl<H, L> GradientBoost<H, L> {
    /// Number of correction rounds.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }


    /// Shrinkage applied to each correction model.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }


    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }


    /// Returns `true` once `fit` has completed every round.
    pub fn is_fitted(&self) -> bool {
        self.state == State::Fitted
    }


    /// Stage-0 model, if `fit` got that far.
    pub fn base_model(&self) -> Option<&H> {
        self.base_model.as_ref()
    }


    /// Correction models in fitting order.
    pub fn models(&self) -> &[H] {
        &self.models[..]
    }


    /// Mean training loss after each round,
    /// index-aligned with [`GradientBoost::models`].
    pub fn iteration_losses(&self) -> &[f64] {
        &self.losses[..]
    }


    /// Columns seen by `fit`.
    pub fn schema(&self) -> Option<&FeatureSchema> {
        self.schema.as_ref()
    }


    /// Detach the fitted model from the booster.
    pub fn into_combined(self) -> Result<CombinedRegressor<H>> {
        if self.state != State::Fitted {
            return Err(BoostError::NotFitted("into_combined"));
        }
        match (self.base_model, self.schema) {
            (Some(base), Some(schema)) => Ok(CombinedRegressor::new(
                base, self.learning_rate, self.models, schema
            )),
            _ => Err(BoostError::NotFitted("into_combined")),
        }
    }


    fn additive(&self) -> Option<AdditiveModel<'_, H>> {
        self.base_model.as_ref()
            .map(|base| AdditiveModel::new(base, self.learning_rate, &self.models))
    }
}


impl<H, L> GradientBoost<H, L>
    where H: Regressor,
          L: LossFunction,
{
    /// Fit the ensemble on `(data, target)`.
    ///
    /// `target` is a frame whose first column holds the target values.
    /// `factory` is called `n_iter + 1` times,
    /// each time for a fresh, untrained weak learner.
    ///
    /// An ensemble can be fitted only once.
    /// After an error it must be discarded.
    pub fn fit<W, F>(
        &mut self,
        data: &DataFrame,
        target: &DataFrame,
        factory: F,
    ) -> Result<&mut Self>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W,
    {
        self.run(data, target, factory)?;
        Ok(self)
    }


    /// Predict the target values of every row of `data`.
    ///
    /// `data` must have the same columns, in the same order
    /// and with the same dtypes, as the frame given to `fit`.
    pub fn predict(&self, data: &DataFrame) -> Result<Vec<f64>> {
        if self.state != State::Fitted {
            return Err(BoostError::NotFitted("predict"));
        }
        if let Some(schema) = &self.schema {
            schema.check(data)?;
        }
        self.additive()
            .ok_or(BoostError::NotFitted("predict"))?
            .predict_all(data)
    }
}


impl<H, L> Booster<H> for GradientBoost<H, L>
    where H: Regressor,
          L: LossFunction,
{
    fn name(&self) -> &str {
        "Gradient Boosting Machine"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_feature = self.schema.as_ref().map_or(0, |s| s.len());
        let weak_learner = self.weak_learner.clone()
            .unwrap_or_else(|| "-".to_string());
        let info = Vec::from([
            ("# of examples", format!("{}", self.n_sample)),
            ("# of features", format!("{n_feature}")),
            ("Loss", self.loss.name().to_string()),
            ("Learning rate", format!("{}", self.learning_rate)),
            ("Max iteration", format!("{}", self.n_iter)),
            ("Weak learner", weak_learner),
        ]);
        Some(info)
    }


    fn preprocess<W, F>(
        &mut self,
        data: &DataFrame,
        target: &DataFrame,
        factory: &mut F,
    ) -> Result<()>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W,
    {
        if self.state != State::Uninitialized {
            return Err(BoostError::AlreadyFitted);
        }
        self.state = State::Fitting;

        let target = utils::target_values(target)?;
        checker::check_sample(data, &target)?;

        let n_sample = target.len();
        let weak_learner = factory();
        let name = weak_learner.name().to_string();
        info!(
            "fitting {} rounds of `{name}` on {n_sample} rows \
             (learning rate {}, {})",
            self.n_iter,
            self.learning_rate,
            self.loss.name(),
        );

        // Stage 0 fits the target itself and is not shrunk.
        let base_model = weak_learner.fit(data, &target)?;
        let predictions = base_model.predict_all(data)?;
        checker::check_predictions(&name, &predictions, n_sample)?;

        self.schema = Some(FeatureSchema::of(data));
        self.weak_learner = Some(name);
        self.n_sample = n_sample;

        self.base_model = Some(base_model);
        self.models = Vec::with_capacity(self.n_iter);
        self.losses = Vec::with_capacity(self.n_iter);

        self.target = target;
        self.predictions = predictions;
        Ok(())
    }


    fn boost<W, F>(
        &mut self,
        data: &DataFrame,
        factory: &mut F,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W,
    {
        if self.state != State::Fitting || self.base_model.is_none() {
            return Err(BoostError::OutOfOrder("boost"));
        }
        if self.n_iter < iteration {
            return Ok(ControlFlow::Break(self.n_iter));
        }


        // Pseudo-residuals: the negative gradient at the current point.
        let residuals = self.loss.gradient(&self.predictions, &self.target)
            .into_iter()
            .map(|g| -g)
            .collect::<Vec<_>>();
        if residuals.iter().any(|r| !r.is_finite()) {
            return Err(BoostError::InvalidParameter {
                parameter: "loss",
                value: self.loss.name().to_string(),
                reason: "its gradient is not finite at the current prediction",
            });
        }

        let weak_learner = factory();
        let name = weak_learner.name().to_string();
        let h = weak_learner.fit(data, &residuals)?;

        let correction = h.predict_all(data)?;
        checker::check_predictions(&name, &correction, self.n_sample)?;

        let lr = self.learning_rate;
        self.predictions.par_iter_mut()
            .zip(correction)
            .for_each(|(p, q)| { *p += lr * q; });

        self.models.push(h);

        let loss = self.loss.eval(&self.predictions, &self.target);
        self.losses.push(loss);
        debug!("round {iteration}/{}: mean training loss {loss}", self.n_iter);

        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Result<()> {
        let complete = self.models.len() == self.n_iter
            && self.losses.len() == self.n_iter;
        if self.state != State::Fitting
            || self.base_model.is_none()
            || !complete
        {
            return Err(BoostError::OutOfOrder("postprocess"));
        }

        if let Some(loss) = self.losses.last() {
            info!("fitted {} rounds, final training loss {loss}", self.n_iter);
        }

        self.target = Vec::new();
        self.predictions = Vec::new();
        self.state = State::Fitted;
        Ok(())
    }
}


impl<H, L> CurrentHypothesis for GradientBoost<H, L> {
    type Hypothesis = H;

    fn current_hypothesis(&self) -> Result<AdditiveModel<'_, H>> {
        self.additive().ok_or(BoostError::OutOfOrder("current_hypothesis"))
    }
}


impl<H, L> Regressor for GradientBoost<H, L>
    where H: Regressor,
          L: LossFunction,
{
    fn predict_all(&self, data: &DataFrame) -> Result<Vec<f64>> {
        self.predict(data)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegressionTree;

    fn toy() -> (DataFrame, DataFrame) {
        let x = (0..10).map(|i| i as f64).collect::<Vec<_>>();
        let y = x.iter().map(|x| x * x).collect::<Vec<_>>();
        (df!("x" => x).unwrap(), df!("y" => y).unwrap())
    }


    #[test]
    fn state_transitions() {
        let (data, target) = toy();
        let mut gbm = GradientBoost::init(3, 0.1).unwrap();
        assert_eq!(gbm.state(), State::Uninitialized);
        gbm.fit(&data, &target, || RegressionTree::default().max_depth(1))
            .unwrap();
        assert_eq!(gbm.state(), State::Fitted);
        assert!(gbm.is_fitted());
    }


    #[test]
    fn boost_before_preprocess_is_out_of_order() {
        let (data, _) = toy();
        let mut gbm = GradientBoost::init(3, 0.1).unwrap();
        let mut factory = RegressionTree::default;
        let err = gbm.boost(&data, &mut factory, 1).unwrap_err();
        assert!(matches!(err, BoostError::OutOfOrder("boost")));
    }


    #[test]
    fn info_reports_the_weak_learner() {
        let (data, target) = toy();
        let mut gbm = GradientBoost::init(2, 0.1).unwrap();
        gbm.fit(&data, &target, RegressionTree::default).unwrap();
        let info = gbm.info().unwrap();
        assert!(info.contains(&("Weak learner", "Regression Tree".into())));
        assert!(info.contains(&("# of examples", "10".into())));
    }


    #[test]
    fn training_buffers_are_released() {
        let (data, target) = toy();
        let mut gbm = GradientBoost::init(2, 0.1).unwrap();
        gbm.fit(&data, &target, RegressionTree::default).unwrap();
        assert!(gbm.target.is_empty());
        assert!(gbm.predictions.is_empty());
    }
}
