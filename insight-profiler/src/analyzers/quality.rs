//! Table-wide data quality checks.

use std::collections::HashSet;

use tracing::instrument;

use super::{percentage, ratio};
use super::profile_types::{HighMissingColumn, QualityReport};
use crate::config::ProfilerConfig;
use crate::dataset::{CellKey, Dataset};

/// Finds duplicate rows, constant columns and mostly-missing columns.
///
/// Runs over the whole table and does not depend on column classes.
pub struct QualityAuditor<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> QualityAuditor<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    #[instrument(skip_all, fields(rows = dataset.num_rows()))]
    pub fn audit(&self, dataset: &Dataset) -> QualityReport {
        let rows = dataset.num_rows();
        let duplicate_rows = count_duplicate_rows(dataset);

        let constant_columns = dataset
            .columns()
            .iter()
            .filter(|column| column.distinct_count() <= 1)
            .map(|column| column.name().to_string())
            .collect();

        let high_missing_columns = dataset
            .columns()
            .iter()
            .filter_map(|column| {
                let fraction = ratio(column.missing_count(), rows);
                (fraction >= self.config.high_missing_threshold).then(|| HighMissingColumn {
                    column: column.name().to_string(),
                    missing_pct: fraction * 100.0,
                })
            })
            .collect();

        QualityReport {
            duplicate_rows,
            duplicate_rows_pct: percentage(duplicate_rows, rows),
            constant_columns,
            high_missing_columns,
        }
    }
}

/// Rows identical to an earlier row in every column, missing equal to missing.
fn count_duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.num_rows());
    (0..dataset.num_rows())
        .filter(|&i| !seen.insert(dataset.row(i).map(|cell| cell.key()).collect()))
        .count()
}
