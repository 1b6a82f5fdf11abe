use colored::Colorize;
use polars::prelude::*;

use crate::{
    common::{checker, utils, FeatureSchema, LossFunction},
    AdditiveModel,
    Booster,
    Regressor,
    Result,
    WeakLearner,
};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;

const DEFAULT_ROUND: usize = 100;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Iteration,TrainLoss,TestLoss,Time\n";


/// Implementing this trait allows you to use `Logger` to
/// log algorithm's behavor.
pub trait CurrentHypothesis {
    /// Type of the models being combined.
    type Hypothesis;

    /// Returns the combined hypothesis at current state.
    fn current_hypothesis(&self) -> Result<AdditiveModel<'_, Self::Hypothesis>>;
}


/// Struct `Logger` provides a generic function that
/// logs train/test loss value and running time
/// for each step of boosting.
///
/// ```no_run
/// use polars::prelude::*;
/// use gradboost::prelude::*;
///
/// # fn frames() -> (DataFrame, DataFrame, DataFrame, DataFrame) { todo!() }
/// let (train_x, train_y, test_x, test_y) = frames();
///
/// let gbm = GradientBoost::init(100, 0.1).unwrap();
/// let logger = Logger::new(
///     gbm,
///     || RegressionTree::default().max_depth(3),
///     GBMLoss::L2,
///     (&train_x, &train_y),
///     (&test_x, &test_y),
/// );
/// let gbm = logger.print_every(10).run("gbm.csv").unwrap();
/// ```
pub struct Logger<'a, B, F, G> {
    booster: B,
    factory: F,
    loss_func: G,
    train: (&'a DataFrame, &'a DataFrame),
    test: (&'a DataFrame, &'a DataFrame),
    round: usize,
}


impl<'a, B, F, G> Logger<'a, B, F, G> {
    /// Create a new instance of `Logger`.
    /// `train` and `test` are `(features, target)` pairs.
    pub fn new(
        booster: B,
        factory: F,
        loss_func: G,
        train: (&'a DataFrame, &'a DataFrame),
        test: (&'a DataFrame, &'a DataFrame),
    ) -> Self
    {
        Self {
            booster,
            factory,
            loss_func,
            train,
            test,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every `100` rounds.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }
}


impl<H, W, B, F, G> Logger<'_, B, F, G>
    where B: Booster<H> + CurrentHypothesis<Hypothesis = H>,
          H: Regressor,
          W: WeakLearner<Hypothesis = H>,
          F: FnMut() -> W,
          G: LossFunction,
{
    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "TRAIN".bold().green(),
            "TEST".bold().yellow(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ROUND".bold().red(),
            "LOSS".bold().green(),
            "LOSS".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Booster".bold(),
            self.booster.name().bold().green(),
        );

        if let Some(info) = self.booster.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Evaluation loss".bold(),
            self.loss_func.name().bold().green(),
            "".bold(),
        );
    }


    fn print_line(&self, tag: &str, iter: usize, train: f64, test: f64, time: u128) {
        println!(
            "{} {}\t\t{}\t{}\t{}",
            tag,
            format!("{:>WIDTH$}", iter).red(),
            format!("{:>WIDTH$.PREC_WIDTH$}", train).green(),
            format!("{:>WIDTH$.PREC_WIDTH$}", test).yellow(),
            time_format(time).bold().cyan(),
        );
    }


    /// Run the given boosting algorithm with logging.
    /// Note that this method is almost the same as `Booster::run`.
    /// This method measures running time per iteration
    /// and returns the fitted booster.
    pub fn run<P: AsRef<Path>>(mut self, filename: P) -> Result<B> {
        let (train_x, train_target) = self.train;
        let (test_x, test_target) = self.test;
        let train_y = utils::target_values(train_target)?;
        let test_y = utils::target_values(test_target)?;
        checker::check_sample(test_x, &test_y)?;
        FeatureSchema::of(train_x).check(test_x)?;

        // Open file
        let mut file = File::create(filename)?;

        // Write header to the file
        file.write_all(HEADER.as_bytes())?;

        // ---------------------------------------------------------------------
        // Pre-processing
        let now = Instant::now();
        self.booster.preprocess(train_x, train_target, &mut self.factory)?;
        let mut time_acc = now.elapsed().as_millis();
        self.print_stats();

        // ---------------------------------------------------------------------
        // Boosting step
        if self.round != usize::MAX { self.print_log_header(); }
        let mut last = (0, f64::NAN, f64::NAN);
        for iter in 1.. {
            // Start measuring time
            let now = Instant::now();

            let flow = self.booster.boost(train_x, &mut self.factory, iter)?;

            // Stop measuring and convert `Duration` to Milliseconds.
            time_acc += now.elapsed().as_millis();

            if flow.is_break() { break; }

            let f = self.booster.current_hypothesis()?;
            let train = self.loss_func.eval(&f.predict_all(train_x)?, &train_y);
            let test = self.loss_func.eval(&f.predict_all(test_x)?, &test_y);

            // Write the results to `file`.
            let line = format!("{iter},{train},{test},{time_acc}\n");
            file.write_all(line.as_bytes())?;

            if self.round != usize::MAX && iter % self.round == 0 {
                let tag = "[LOG]".bold().magenta().to_string();
                self.print_line(&tag, iter, train, test, time_acc);
            }
            last = (iter, train, test);
        }

        self.booster.postprocess()?;

        if self.round != usize::MAX {
            let (iter, train, test) = last;
            let tag = "[FIN]".bold().bright_green().to_string();
            self.print_line(&tag, iter, train, test, time_acc);
        }
        Ok(self.booster)
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_formatted_by_magnitude() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(61_005), " 01m 01s");
        assert_eq!(time_format(3_600_000), " 01h 00m");
    }
}
