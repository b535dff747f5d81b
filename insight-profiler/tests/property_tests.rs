//! Property-based tests for profiling invariants.

use insight_profiler::analyzers::{
    CategoricalStatistician, ColumnClass, CorrelationAnalyzer, NumericStatistician,
    QualityAuditor,
};
use insight_profiler::dataset::{CellValue, Column, Dataset, StorageType};
use insight_profiler::prelude::*;
use proptest::prelude::*;

// ============================================================================
// Test Data Generation Utilities
// ============================================================================

fn cells<T: std::fmt::Debug + Clone + 'static>(
    rows: usize,
    values: impl Strategy<Value = T> + 'static,
    wrap: fn(T) -> CellValue,
) -> impl Strategy<Value = Vec<CellValue>> {
    prop::collection::vec(prop::option::weighted(0.8, values), rows)
        .prop_map(move |raw| raw.into_iter().map(|v| v.map_or(CellValue::Missing, wrap)).collect())
}

fn column_strategy(rows: usize) -> impl Strategy<Value = (StorageType, Vec<CellValue>)> {
    prop_oneof![
        cells(rows, -50i64..50, CellValue::Integer).prop_map(|c| (StorageType::Integer, c)),
        cells(rows, 0i64..2, CellValue::Integer).prop_map(|c| (StorageType::Integer, c)),
        cells(rows, -1e6f64..1e6, CellValue::Float).prop_map(|c| (StorageType::Float, c)),
        cells(rows, any::<bool>(), CellValue::Boolean).prop_map(|c| (StorageType::Boolean, c)),
        cells(rows, "[a-d]{1,2}", CellValue::Text).prop_map(|c| (StorageType::Text, c)),
        cells(rows, 1u32..28, |d| CellValue::Text(format!("2024-02-{d:02}")))
            .prop_map(|c| (StorageType::Text, c)),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (1usize..40).prop_flat_map(|rows| {
        prop::collection::vec(column_strategy(rows), 1..7).prop_map(|columns| {
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(i, (storage, cells))| Column::new(format!("c{i}"), storage, cells))
                .collect();
            Dataset::from_columns(columns).unwrap()
        })
    })
}

fn float_column(values: &[f64]) -> Column {
    Column::new(
        "value",
        StorageType::Float,
        values.iter().copied().map(CellValue::Float).collect(),
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn classification_partitions_columns(dataset in dataset_strategy()) {
        let result = Profiler::builder().build().unwrap().profile(&dataset).unwrap();

        prop_assert_eq!(result.columns.total(), dataset.num_columns());
        for name in dataset.column_names() {
            let hits = ColumnClass::ALL
                .into_iter()
                .filter(|class| result.columns.columns(*class).contains(&name))
                .count();
            prop_assert_eq!(hits, 1);
        }

        for column in dataset.columns() {
            if column.non_missing_count() == 0 {
                let class = result.columns.class_of(column.name()).unwrap();
                prop_assert_eq!(class, ColumnClass::Categorical);
            }
        }
    }

    #[test]
    fn profiling_is_deterministic(dataset in dataset_strategy()) {
        let profiler = Profiler::builder().build().unwrap();
        let first = profiler.profile(&dataset).unwrap();
        let second = profiler.profile(&dataset).unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn quantiles_are_ordered(
        values in prop::collection::vec(
            prop_oneof![
                8 => -1e9f64..1e9,
                1 => Just(f64::INFINITY),
                1 => Just(f64::NEG_INFINITY),
            ],
            1..200,
        )
    ) {
        let config = ProfilerConfig::default();
        let result = NumericStatistician::new(&config).profile(&float_column(&values));

        let has_pos_inf = values.contains(&f64::INFINITY);
        let has_neg_inf = values.contains(&f64::NEG_INFINITY);
        if has_pos_inf && has_neg_inf {
            prop_assert!(result.is_err());
            return Ok(());
        }
        let stats = result.unwrap();

        for quartile in [stats.q25, stats.median, stats.q75] {
            prop_assert!(!quartile.is_nan());
        }
        prop_assert!(stats.min <= stats.q25);
        prop_assert!(stats.q25 <= stats.median);
        prop_assert!(stats.median <= stats.q75);
        prop_assert!(stats.q75 <= stats.max);
        prop_assert!((0.0..=100.0).contains(&stats.outlier_pct));
        prop_assert!(stats.outlier_count <= stats.count);
        if !has_pos_inf && !has_neg_inf {
            prop_assert_eq!(stats.std.is_none(), values.len() < 2);
        }
    }

    #[test]
    fn category_counts_and_entropy(values in prop::collection::vec(prop::option::of("[a-e]"), 0..100)) {
        let config = ProfilerConfig {
            top_categories_count: 100,
            ..ProfilerConfig::default()
        };
        let column = Column::new(
            "label",
            StorageType::Text,
            values
                .iter()
                .map(|v| v.clone().map_or(CellValue::Missing, CellValue::Text))
                .collect(),
        );
        let stats = CategoricalStatistician::new(&config).profile(&column);

        let total: usize = stats.top_categories.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, stats.count);
        prop_assert_eq!(stats.count + stats.missing, values.len());
        prop_assert_eq!(stats.top_categories.len(), stats.unique_count);
        prop_assert!(stats.entropy >= 0.0);
        prop_assert_eq!(stats.entropy == 0.0, stats.unique_count <= 1);
        for pair in stats.top_categories.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn correlation_matrix_is_symmetric(
        rows in prop::collection::vec((-100i64..100, -100i64..100, prop::option::of(-100i64..100)), 2..60),
        threshold in 0.0f64..1.0,
    ) {
        let columns = vec![
            Column::new("a", StorageType::Integer, rows.iter().map(|r| CellValue::Integer(r.0)).collect()),
            Column::new("b", StorageType::Integer, rows.iter().map(|r| CellValue::Integer(r.1)).collect()),
            Column::new(
                "c",
                StorageType::Integer,
                rows.iter().map(|r| r.2.map_or(CellValue::Missing, CellValue::Integer)).collect(),
            ),
        ];
        let dataset = Dataset::from_columns(columns).unwrap();
        let config = ProfilerConfig {
            correlation_threshold: threshold,
            ..ProfilerConfig::default()
        };
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let report = CorrelationAnalyzer::new(&config).analyze(&dataset, &names);

        for x in &names {
            for y in &names {
                prop_assert_eq!(report.get(x, y), report.get(y, x));
                if let Some(r) = report.get(x, y) {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
            if let Some(diagonal) = report.get(x, x) {
                prop_assert_eq!(diagonal, 1.0);
            }
        }

        let strong = &report.strong_correlations;
        for pair in strong {
            prop_assert!(pair.correlation.abs() >= threshold);
        }
        for window in strong.windows(2) {
            prop_assert!(window[0].correlation.abs() >= window[1].correlation.abs());
        }
    }

    #[test]
    fn duplicate_percentage_matches_count(keys in prop::collection::vec(0i64..8, 1..80)) {
        let dataset = Dataset::from_columns(vec![Column::new(
            "k",
            StorageType::Integer,
            keys.iter().copied().map(CellValue::Integer).collect(),
        )])
        .unwrap();
        let report = QualityAuditor::new(&ProfilerConfig::default()).audit(&dataset);

        let distinct = keys.iter().collect::<std::collections::HashSet<_>>().len();
        prop_assert_eq!(report.duplicate_rows, keys.len() - distinct);
        let expected = report.duplicate_rows as f64 / keys.len() as f64 * 100.0;
        prop_assert!((report.duplicate_rows_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn distinct_rows_have_no_duplicates(n in 1usize..200) {
        let dataset = Dataset::from_columns(vec![Column::new(
            "n",
            StorageType::Integer,
            (0..n as i64).map(CellValue::Integer).collect(),
        )])
        .unwrap();
        let report = QualityAuditor::new(&ProfilerConfig::default()).audit(&dataset);
        prop_assert_eq!(report.duplicate_rows, 0);
        prop_assert_eq!(report.duplicate_rows_pct, 0.0);
    }
}
