//! Provides `Booster` trait.
use polars::prelude::*;

use crate::{
    Result,
    WeakLearner,
};

use std::ops::ControlFlow;


/// The trait [`Booster`] defines the standard framework of Boosting.
/// Here, the **standard framework** is defined as
/// a sequence of rounds between **Booster** and **Weak Learner**:
///
/// 1. Before the first round, Booster fits its initial model.
/// 2. In each round `t = 1, 2, ...`,
///    Booster asks a fresh Weak Learner for a hypothesis
///    that corrects the current combined model,
///    and blends it in.
///
/// Fresh weak learners come from `factory`,
/// which is called once per fitted hypothesis.
///
/// # Required Methods
/// - [`Booster::name`]
/// - [`Booster::preprocess`]
/// - [`Booster::boost`]
/// - [`Booster::postprocess`]
/// - [`Booster::info`] ... optional.
///
/// # Provided Methods
/// - [`Booster::run`]
pub trait Booster<H> {
    /// Returns the name of the boosting algorithm.
    fn name(&self) -> &str;


    /// Returns the information of boosting algorithm as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that runs boosting algorithm.
    /// Any error aborts the run immediately.
    fn run<W, F>(
        &mut self,
        data: &DataFrame,
        target: &DataFrame,
        mut factory: F,
    ) -> Result<()>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W,
    {
        self.preprocess(data, target, &mut factory)?;

        for iteration in 1.. {
            if self.boost(data, &mut factory, iteration)?.is_break() {
                break;
            }
        }

        self.postprocess()
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`],
    /// this method is called before the boosting process.
    fn preprocess<W, F>(
        &mut self,
        data: &DataFrame,
        target: &DataFrame,
        factory: &mut F,
    ) -> Result<()>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W;


    /// Boosting step per iteration.
    /// This method returns
    /// `ControlFlow::Continue(())` while rounds remain,
    /// `ControlFlow::Break(n_rounds)` otherwise.
    fn boost<W, F>(
        &mut self,
        data: &DataFrame,
        factory: &mut F,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Hypothesis = H>,
              F: FnMut() -> W;


    /// Post-processing.
    fn postprocess(&mut self) -> Result<()>;
}
