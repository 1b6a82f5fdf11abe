//! This file defines split rules for regression tree.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};


/// Splits whose SSE reduction is below this value are ignored.
const GAIN_TOLERANCE: f64 = 1e-12;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LR {
    Left,
    Right,
}


/// Sends a row left iff `value <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct Splitter {
    pub(super) feature: usize,
    pub(super) threshold: f64,
}


impl Splitter {
    #[inline]
    pub(super) fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold, }
    }


    /// Defines the splitting.
    #[inline]
    pub(super) fn split(&self, columns: &[Vec<f64>], row: usize) -> LR {
        if columns[self.feature][row] <= self.threshold {
            LR::Left
        } else {
            LR::Right
        }
    }
}


/// A candidate split together with its SSE reduction.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Split {
    pub(super) rule: Splitter,
    pub(super) gain: f64,
}


/// Finds the split over all features
/// that maximizes the reduction of the sum of squared errors.
///
/// Ties are broken towards the lower feature index,
/// then towards the lower threshold.
pub(super) fn best_split(
    columns: &[Vec<f64>],
    target: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<Split>
{
    let candidates = columns.par_iter()
        .enumerate()
        .map(|(j, column)| {
            best_split_on(j, column, target, indices, min_samples_leaf)
        })
        .collect::<Vec<_>>();

    candidates.into_iter()
        .flatten()
        .fold(None, |best: Option<Split>, split| {
            match best {
                Some(b) if b.gain >= split.gain => Some(b),
                _ => Some(split),
            }
        })
}


fn best_split_on(
    feature: usize,
    column: &[f64],
    target: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<Split>
{
    let n_items = indices.len();
    let min_samples_leaf = min_samples_leaf.max(1);
    if n_items < 2 * min_samples_leaf {
        return None;
    }

    let mut sorted = indices.to_vec();
    sorted.sort_by(|&a, &b| column[a].total_cmp(&column[b]));

    let total = sorted.iter().map(|&i| target[i]).sum::<f64>();
    let base = total.powi(2) / n_items as f64;

    let mut best: Option<Split> = None;
    let mut left_sum = 0.0_f64;
    for k in 0..n_items - 1 {
        left_sum += target[sorted[k]];

        let lo = column[sorted[k]];
        let hi = column[sorted[k + 1]];
        // `NaN` has no place in the ordering, so no threshold sits next to it.
        if lo == hi || lo.is_nan() || hi.is_nan() { continue; }

        let n_left = k + 1;
        let n_right = n_items - n_left;
        if n_left < min_samples_leaf || n_right < min_samples_leaf {
            continue;
        }

        let right_sum = total - left_sum;
        let gain = left_sum.powi(2) / n_left as f64
            + right_sum.powi(2) / n_right as f64
            - base;

        if gain <= GAIN_TOLERANCE {
            continue;
        }
        if best.as_ref().is_some_and(|b| b.gain >= gain) {
            continue;
        }

        // The midpoint can round up to `hi` for adjacent floats.
        let mut threshold = lo + (hi - lo) / 2.0;
        if threshold >= hi { threshold = lo; }

        best = Some(Split {
            rule: Splitter::new(feature, threshold),
            gain,
        });
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_function_is_split_at_the_jump() {
        let columns = vec![vec![1.0, 2.0, 3.0, 4.0]];
        let target = [0.0, 0.0, 5.0, 5.0];
        let split = best_split(&columns, &target, &[0, 1, 2, 3], 1).unwrap();
        assert_eq!(split.rule, Splitter::new(0, 2.5));
        assert!((split.gain - 25.0).abs() < 1e-9);
    }


    #[test]
    fn informative_feature_wins() {
        let columns = vec![
            vec![1.0, 1.0, 1.0, 1.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ];
        let target = [1.0, 1.0, -1.0, -1.0];
        let split = best_split(&columns, &target, &[0, 1, 2, 3], 1).unwrap();
        assert_eq!(split.rule.feature, 1);
        assert_eq!(split.rule.split(&columns, 0), LR::Right);
        assert_eq!(split.rule.split(&columns, 3), LR::Left);
    }


    #[test]
    fn ties_prefer_lower_feature_index() {
        let columns = vec![vec![1.0, 2.0], vec![1.0, 2.0]];
        let target = [0.0, 1.0];
        let split = best_split(&columns, &target, &[0, 1], 1).unwrap();
        assert_eq!(split.rule.feature, 0);
    }


    #[test]
    fn constant_target_has_no_split() {
        let columns = vec![vec![1.0, 2.0, 3.0]];
        let target = [2.0, 2.0, 2.0];
        assert!(best_split(&columns, &target, &[0, 1, 2], 1).is_none());
    }


    #[test]
    fn nan_boundary_is_never_a_threshold() {
        let columns = vec![vec![1.0, 2.0, 3.0, 4.0, f64::NAN]];
        let target = [0.0, 0.0, 10.0, 10.0, 100.0];
        let split = best_split(&columns, &target, &[0, 1, 2, 3, 4], 1)
            .unwrap();
        assert_eq!(split.rule.threshold, 3.5);
        assert_eq!(split.rule.split(&columns, 0), LR::Left);
        assert_eq!(split.rule.split(&columns, 3), LR::Right);
    }


    #[test]
    fn min_samples_leaf_is_respected() {
        let columns = vec![vec![1.0, 2.0, 3.0, 4.0]];
        let target = [10.0, 0.0, 0.0, 0.0];
        let split = best_split(&columns, &target, &[0, 1, 2, 3], 2).unwrap();
        assert_eq!(split.rule.threshold, 2.5);
    }
}
