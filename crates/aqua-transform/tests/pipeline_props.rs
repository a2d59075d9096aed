//! Property-based tests for the fitted pipeline.

use polars::prelude::*;
use proptest::prelude::*;

use aqua_model::{ImputeStrategy, PreprocessOptions, ScalingMode};
use aqua_transform::{FittedPipeline, preprocess};

fn feature_frame(rows: &[(Option<f64>, Option<f64>)]) -> DataFrame {
    let (ph, sulfate): (Vec<Option<f64>>, Vec<Option<f64>>) = rows.iter().copied().unzip();
    DataFrame::new(vec![
        Series::new("ph".into(), ph).into_column(),
        Series::new("Sulfate".into(), sulfate).into_column(),
    ])
    .expect("frame")
}

/// Median with the middle-two average for even counts, matching the fitted
/// statistic.
fn sorted_median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

fn cell() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-1.0e6..1.0e6f64)
}

fn strategy() -> impl Strategy<Value = ImputeStrategy> {
    prop_oneof![
        Just(ImputeStrategy::Mean),
        Just(ImputeStrategy::Median),
        Just(ImputeStrategy::MostFrequent),
        Just(ImputeStrategy::Constant),
    ]
}

proptest! {
    #[test]
    fn reloaded_pipeline_reproduces_the_transform(
        rows in prop::collection::vec((cell(), cell()), 1..30),
        strategy in strategy(),
        fill in -100.0..100.0f64,
        scale in any::<bool>(),
    ) {
        let features = feature_frame(&rows);
        let options = PreprocessOptions::new()
            .with_strategy(strategy)
            .with_fill_value(fill)
            .with_scaling(if scale { ScalingMode::Standard } else { ScalingMode::Skip });

        let (pipeline, transformed) =
            FittedPipeline::fit_transform(&features, &options).expect("fit");
        let bytes = pipeline.to_bytes().expect("encode");
        let reloaded = FittedPipeline::from_bytes(&bytes).expect("decode");
        let replayed = reloaded.transform(&features).expect("transform");

        prop_assert!(replayed.equals(&transformed));
    }

    #[test]
    fn imputed_features_have_no_missing_cells(
        rows in prop::collection::vec((cell(), cell()), 1..30),
        strategy in strategy(),
        fill in -100.0..100.0f64,
    ) {
        let features = feature_frame(&rows);
        let options = PreprocessOptions::new()
            .with_strategy(strategy)
            .with_fill_value(fill);

        let (_, transformed) =
            FittedPipeline::fit_transform(&features, &options).expect("fit");
        for column in transformed.get_columns() {
            prop_assert_eq!(column.null_count(), 0);
        }
    }

    #[test]
    fn median_imputation_preserves_the_observed_median(
        rows in prop::collection::vec((cell(), cell()), 1..30),
    ) {
        let features = feature_frame(&rows);
        let options = PreprocessOptions::new().with_strategy(ImputeStrategy::Median);
        let (_, transformed) =
            FittedPipeline::fit_transform(&features, &options).expect("fit");

        for (input, output) in features.get_columns().iter().zip(transformed.get_columns()) {
            let observed: Vec<f64> = input
                .as_materialized_series()
                .f64()
                .expect("f64 column")
                .into_iter()
                .flatten()
                .collect();
            if observed.is_empty() {
                continue;
            }
            let filled: Vec<f64> = output
                .as_materialized_series()
                .f64()
                .expect("f64 column")
                .into_iter()
                .flatten()
                .collect();
            let before = sorted_median(observed);
            let after = sorted_median(filled);
            prop_assert!(
                (before - after).abs() <= 1e-9 * before.abs().max(1.0),
                "median moved from {before} to {after}"
            );
        }
    }

    #[test]
    fn complete_datasets_pass_through_unchanged(
        rows in prop::collection::vec((-1.0e6..1.0e6f64, -1.0e6..1.0e6f64), 1..30),
        labels in prop::collection::vec(0i64..2, 30),
    ) {
        let (ph, sulfate): (Vec<f64>, Vec<f64>) = rows.iter().copied().unzip();
        let labels = labels[..ph.len()].to_vec();
        let df = DataFrame::new(vec![
            Series::new("ph".into(), ph).into_column(),
            Series::new("Sulfate".into(), sulfate).into_column(),
            Series::new("Potability".into(), labels).into_column(),
        ])
        .expect("frame");

        let outcome = preprocess(&df, &PreprocessOptions::new()).expect("preprocess");
        prop_assert!(outcome.pipeline.is_none());
        prop_assert!(outcome.cleaned.equals(&df));

        let again = preprocess(&outcome.cleaned, &PreprocessOptions::new()).expect("second pass");
        prop_assert!(again.cleaned.equals(&outcome.cleaned));
    }
}
