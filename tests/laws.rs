use polars::prelude::*;
use proptest::prelude::*;
use gradboost::prelude::*;


fn frames(rows: &[(f64, f64)]) -> (DataFrame, DataFrame) {
    let x = rows.iter().map(|r| r.0).collect::<Vec<_>>();
    let y = rows.iter().map(|r| r.1).collect::<Vec<_>>();
    (df!("x" => x).unwrap(), df!("y" => y).unwrap())
}


fn sample() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0..100.0_f64, -100.0..100.0_f64), 5..30)
}


proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn additive_decomposition(
        rows in sample(),
        n_iter in 0_usize..8,
        lr in 0.01..1.0_f64,
        depth in 1_usize..4,
    ) {
        let (data, target) = frames(&rows);
        let mut gbm = GradientBoost::init(n_iter, lr).unwrap();
        gbm.fit(&data, &target, || RegressionTree::default().max_depth(depth))
            .unwrap();

        prop_assert_eq!(gbm.models().len(), n_iter);
        prop_assert_eq!(gbm.iteration_losses().len(), n_iter);

        let predictions = gbm.predict(&data).unwrap();
        let base = gbm.base_model().unwrap().predict_all(&data).unwrap();
        let corrections = gbm.models()
            .iter()
            .map(|h| h.predict_all(&data).unwrap())
            .collect::<Vec<_>>();

        for (i, p) in predictions.iter().enumerate() {
            let sum = corrections.iter().map(|c| c[i]).sum::<f64>();
            let expected = base[i] + lr * sum;
            prop_assert!((p - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }
    }


    #[test]
    fn refitting_reproduces_predictions(
        rows in sample(),
        n_iter in 0_usize..6,
        lr in 0.01..1.0_f64,
    ) {
        let (data, target) = frames(&rows);
        let factory = || RegressionTree::default().max_depth(2);

        let mut a = GradientBoost::init(n_iter, lr).unwrap();
        a.fit(&data, &target, factory).unwrap();
        let mut b = GradientBoost::init(n_iter, lr).unwrap();
        b.fit(&data, &target, factory).unwrap();

        prop_assert_eq!(a.predict(&data).unwrap(), b.predict(&data).unwrap());
    }


    #[test]
    fn squared_loss_is_monotone(rows in sample(), lr in 0.05..1.0_f64) {
        let (data, target) = frames(&rows);
        let mut gbm = GradientBoost::init(10, lr).unwrap();
        gbm.fit(&data, &target, || RegressionTree::default().max_depth(1))
            .unwrap();

        for pair in gbm.iteration_losses().windows(2) {
            prop_assert!(pair[1] <= pair[0] * (1.0 + 1e-9) + 1e-9);
        }
    }
}
