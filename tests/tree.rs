use gradboost::prelude::*;
use polars::prelude::*;

// Toy example  (+/- are the targets +1/-1)
// Splitting `x` at 9.0 and then `y` at 9.5 separates them.
//
// 15|                     |
//   |                   5 |
//   |                  -  |
//   |                     |         6
//   |                     |        -
// 10|       4             |________________________ 9.5
//   |      -              |             1
//   |                     |            +
//   |                     |
//   |                     |   0
//  5|                     |  +
//   |                     |                 2
//   |                     |                +
//   |            3        |
//   |           -         |
//   |_____________________|____________________
//  0            5         | 10            15
//                         |
//                        9.0
fn toy() -> (DataFrame, Vec<f64>) {
    let data = df!(
        "x" => &[10.0, 14.0, 15.0, 5.0, 3.0,  8.0, 12.0],
        "y" => &[ 5.0,  8.0,  3.0, 1.0, 9.0, 13.0, 11.0]
    ).unwrap();
    let target = vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
    (data, target)
}


#[test]
fn recovers_the_partition() {
    let (data, target) = toy();
    let h = RegressionTree::default().fit(&data, &target).unwrap();

    assert_eq!(h.depth(), 2);
    assert_eq!(h.n_leaves(), 3);
    assert_eq!(h.predict_all(&data).unwrap(), target);

    let unseen = df!(
        "x" => &[20.0, 0.0, 12.0],
        "y" => &[20.0, 0.0,  2.0]
    ).unwrap();
    assert_eq!(h.predict_all(&unseen).unwrap(), vec![-1.0, -1.0, 1.0]);
}


#[test]
fn stump_predicts_side_means() {
    let (data, target) = toy();
    let h = RegressionTree::default()
        .max_depth(1)
        .fit(&data, &target)
        .unwrap();

    // Left of `x = 9.0` is pure, right holds three `+` and one `-`.
    let predictions = h.predict_all(&data).unwrap();
    assert_eq!(predictions[3], -1.0);
    assert_eq!(predictions[0], 0.5);
    assert_eq!(predictions[6], 0.5);
}


#[test]
fn integer_features_are_cast() {
    let data = df!("x" => &[1_i32, 2, 3, 4]).unwrap();
    let h = RegressionTree::default()
        .fit(&data, &[0.0, 0.0, 3.0, 3.0])
        .unwrap();
    assert_eq!(h.predict_all(&data).unwrap(), vec![0.0, 0.0, 3.0, 3.0]);
}


#[test]
fn null_features_are_rejected() {
    let data = df!("x" => &[Some(1.0), None, Some(3.0)]).unwrap();
    let err = RegressionTree::default()
        .fit(&data, &[0.0, 1.0, 2.0])
        .unwrap_err();
    assert!(matches!(err, BoostError::MissingValues { n_null: 1, .. }));
}


#[test]
fn boosted_trees_keep_the_partition() {
    let (data, y) = toy();
    let target = df!("target" => y.clone()).unwrap();

    let mut gbm = GradientBoost::init(5, 0.5).unwrap();
    gbm.fit(&data, &target, || RegressionTree::default().max_depth(2))
        .unwrap();

    // The base model is already exact, so every correction is zero.
    assert_eq!(gbm.predict(&data).unwrap(), y);
    assert!(gbm.iteration_losses().iter().all(|&l| l == 0.0));
    assert!(gbm.models().iter().all(|h| h.n_leaves() == 1));
}
