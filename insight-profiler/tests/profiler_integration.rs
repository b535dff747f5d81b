//! End-to-end profiling scenarios.

mod common;

use std::sync::{Arc, Mutex};

use arrow::array::{ArrayRef, Int64Array, StringArray};
use common::*;
use insight_profiler::analyzers::{
    CorrelationStrength, NumericStatistician, ProfileStage, UNKNOWN_FREQUENCY,
};
use insight_profiler::dataset::{CellValue, Column, StorageType};
use insight_profiler::prelude::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_iqr_outlier_in_small_column() {
    let config = ProfilerConfig::default();
    let column = Column::new(
        "value",
        StorageType::Integer,
        [1, 2, 3, 4, 100]
            .into_iter()
            .map(CellValue::Integer)
            .collect(),
    );

    let stats = NumericStatistician::new(&config).profile(&column).unwrap();
    assert_eq!(stats.outlier_count, 1);
    assert_close(stats.outlier_pct, 20.0);
    assert_close(stats.q25, 2.0);
    assert_close(stats.median, 3.0);
    assert_close(stats.q75, 4.0);
    assert_close(stats.max, 100.0);
}

#[test]
fn test_unique_user_id_is_excluded_from_numeric() {
    let ids: Vec<i64> = (1..=1000).collect();
    let scores: Vec<i64> = (1..=1000).map(|i| i % 10).collect();
    let result = profile(&batch_of(vec![
        ("user_id", ints(&ids)),
        ("score", ints(&scores)),
    ]));

    assert_eq!(result.columns.id, vec!["user_id"]);
    assert_eq!(result.columns.numeric, vec!["score"]);
    assert!(!result.numeric_stats.contains_key("user_id"));
    assert!(!result.correlations.matrix.contains_key("user_id"));
}

#[test]
fn test_anti_correlated_columns() {
    let xs: Vec<Option<f64>> = (0..100).map(|i| Some((i % 50) as f64)).collect();
    let ys: Vec<Option<f64>> = xs.iter().map(|x| x.map(|v| -v)).collect();
    let result = profile(&batch_of(vec![("x", floats(&xs)), ("y", floats(&ys))]));

    let strong = &result.correlations.strong_correlations;
    assert_eq!(strong.len(), 1);
    assert_eq!(strong[0].column1, "x");
    assert_eq!(strong[0].column2, "y");
    assert!((strong[0].correlation + 1.0).abs() < 1e-9);
    assert_eq!(strong[0].strength, CorrelationStrength::Negative);

    assert_eq!(result.correlations.get("x", "x"), Some(1.0));
    assert_eq!(
        result.correlations.get("x", "y"),
        result.correlations.get("y", "x")
    );
}

#[test]
fn test_duplicate_rows() {
    let result = profile(&duplicated_rows(100, 10));
    assert_eq!(result.data_quality.duplicate_rows, 10);
    assert_close(result.data_quality.duplicate_rows_pct, 10.0);
}

#[test]
fn test_categorical_frequencies() {
    let result = profile(&batch_of(vec![(
        "grade",
        texts(&[Some("A"), Some("A"), Some("B")]),
    )]));

    assert_eq!(result.columns.categorical, vec!["grade"]);
    let stats = &result.categorical_stats["grade"];
    assert_eq!(stats.unique_count, 2);
    assert_eq!(stats.top_categories.len(), 2);
    assert_eq!(stats.top_categories[0].value, "A");
    assert_eq!(stats.top_categories[0].count, 2);
    assert!((stats.top_categories[0].percentage - 66.7).abs() < 0.05);
    assert_eq!(stats.top_categories[1].value, "B");
    assert_eq!(stats.top_categories[1].count, 1);
    assert!((stats.top_categories[1].percentage - 33.3).abs() < 0.05);
}

#[test]
fn test_orders_profile() {
    let result = profile(&orders());

    assert_eq!(result.overview.rows, 10);
    assert_eq!(result.overview.columns, 8);
    assert!(result.overview.memory_usage_mb > 0.0);

    assert_eq!(result.columns.id, vec!["order_id"]);
    assert_eq!(result.columns.numeric, vec!["amount", "quantity"]);
    assert_eq!(result.columns.boolean, vec!["is_gift"]);
    assert_eq!(result.columns.datetime, vec!["order_date"]);
    assert_eq!(result.columns.categorical, vec!["status", "region", "notes"]);

    let amount = result.numeric_stats["amount"].stats().unwrap();
    assert_eq!(amount.count, 9);
    assert_eq!(amount.missing, 1);
    assert_close(amount.missing_pct, 10.0);
    assert_eq!(amount.outlier_count, 1);

    let dates = result.datetime_stats["order_date"].stats().unwrap();
    assert_eq!(dates.count, 9);
    assert_eq!(dates.missing, 1);
    assert_eq!(dates.range_days, 7);
    assert_eq!(dates.inferred_frequency.as_deref(), Some("1 days 00:00:00"));

    let notes = &result.categorical_stats["notes"];
    assert_eq!(notes.count, 0);
    assert!(notes.top_categories.is_empty());
    assert_eq!(notes.entropy, 0.0);

    assert_eq!(result.correlations.strong_correlations.len(), 1);
    assert_eq!(
        result.correlations.strong_correlations[0].strength,
        CorrelationStrength::Positive
    );

    let quality = &result.data_quality;
    assert_eq!(quality.duplicate_rows, 0);
    assert_eq!(quality.constant_columns, vec!["region", "notes"]);
    assert_eq!(quality.high_missing_columns.len(), 1);
    assert_eq!(quality.high_missing_columns[0].column, "notes");
    assert_close(quality.high_missing_columns[0].missing_pct, 100.0);
}

#[test]
fn test_undefined_mean_becomes_error_marker() {
    let result = profile(&batch_of(vec![
        (
            "ratio",
            floats(&[
                Some(f64::INFINITY),
                Some(f64::NEG_INFINITY),
                Some(f64::INFINITY),
                Some(f64::NEG_INFINITY),
            ]),
        ),
        ("bucket", ints(&[1, 1, 2, 2])),
    ]));

    let ratio = &result.numeric_stats["ratio"];
    assert!(!ratio.is_available());
    assert_eq!(ratio.error(), Some("Computation failed: mean is undefined"));
    assert!(result.numeric_stats["bucket"].is_available());

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(
        json["numeric_stats"]["ratio"],
        serde_json::json!({"error": "Computation failed: mean is undefined"})
    );
}

#[test]
fn test_repeated_timestamps_have_unknown_frequency() {
    let result = profile(&batch_of(vec![(
        "seen_at",
        texts(&[
            Some("2024-03-01 10:00:00"),
            Some("2024-03-01 10:00:00"),
            Some("2024-03-01 10:00:00"),
            Some("2024-03-02 10:00:00"),
        ]),
    )]));

    let stats = result.datetime_stats["seen_at"].stats().unwrap();
    assert_eq!(stats.inferred_frequency.as_deref(), Some(UNKNOWN_FREQUENCY));
    assert_eq!(stats.range_days, 1);
}

#[test]
fn test_empty_dataset_is_rejected() {
    let profiler = Profiler::builder().build().unwrap();

    let no_columns = Dataset::from_columns(Vec::new()).unwrap();
    let err = profiler.profile(&no_columns).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::InputShape {
            rows: 0,
            columns: 0
        }
    ));

    let no_rows = batch_of(vec![(
        "value",
        Arc::new(Int64Array::from(Vec::<i64>::new())) as ArrayRef,
    )]);
    let err = profiler.profile_batch(&no_rows).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::InputShape {
            rows: 0,
            columns: 1
        }
    ));
    assert!(err.is_fatal_input());
}

#[test]
fn test_profile_is_idempotent() {
    let profiler = Profiler::builder().build().unwrap();
    let batch = orders();

    let first = profiler.profile_batch(&batch).unwrap();
    let second = profiler.profile_batch(&batch).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_progress_reports_every_stage_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let profiler = Profiler::builder()
        .progress_callback(move |progress| {
            sink.lock()
                .unwrap()
                .push((progress.stage, progress.current_stage, progress.total_stages));
        })
        .build()
        .unwrap();

    profiler.profile_batch(&orders()).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (ProfileStage::Classification, 1, 4),
            (ProfileStage::Statistics, 2, 4),
            (ProfileStage::Correlation, 3, 4),
            (ProfileStage::Quality, 4, 4),
        ]
    );
}

#[test]
fn test_top_categories_respect_configured_count() {
    let values: Vec<String> = (0..40).map(|i| format!("c{}", i % 20)).collect();
    let batch = batch_of(vec![(
        "code",
        Arc::new(StringArray::from(values)) as ArrayRef,
    )]);

    let result = Profiler::builder()
        .top_categories_count(3)
        .build()
        .unwrap()
        .profile_batch(&batch)
        .unwrap();

    let stats = &result.categorical_stats["code"];
    assert_eq!(stats.unique_count, 20);
    assert_eq!(stats.top_categories.len(), 3);
    assert_eq!(stats.top_categories[0].value, "c0");
    assert_close(stats.entropy, 20f64.ln());
}

#[test]
fn test_summary_json_shape() {
    let result = profile(&orders());
    let summary: serde_json::Value =
        serde_json::from_str(&result.to_summary_json().unwrap()).unwrap();

    assert_eq!(summary["overview"]["rows"], 10);
    assert_eq!(summary["column_types"]["id"][0], "order_id");
    assert_eq!(summary["sample_statistics"]["amount"]["type"], "numeric");
    assert_eq!(
        summary["sample_statistics"]["status"]["top_values"],
        serde_json::json!(["shipped", "pending", "returned"])
    );
    assert!(summary.get("datetime_stats").is_none());
}
