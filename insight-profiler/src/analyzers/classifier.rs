//! Semantic column classification.
//!
//! Every column lands in exactly one [`ColumnClass`]. Rules are applied in
//! order and the first match wins:
//!
//! 1. **id**: the lowercased name contains a configured pattern, or the
//!    ratio of distinct to non-missing values reaches
//!    `high_cardinality_threshold`. Columns with no values never qualify by
//!    ratio.
//! 2. Columns with no values left are **categorical**.
//! 3. Numeric storage (booleans included) is **boolean** when at most two
//!    distinct values all drawn from `{0, 1, true, false}`, **numeric**
//!    otherwise.
//! 4. Temporal storage is **datetime**. Text is **datetime** when the first
//!    `datetime_sample_size` non-missing values all parse as dates.
//! 5. Everything else is **categorical**.

use std::collections::HashSet;

use tracing::{debug, instrument};

use super::profile_types::{ColumnClass, ColumnClassification};
use crate::config::ProfilerConfig;
use crate::dataset::{CellValue, Column, Dataset};
use crate::logging::{truncate_field, LogConfig};
use crate::temporal::parse_datetime;

/// Assigns a [`ColumnClass`] to every column of a dataset.
pub struct ColumnClassifier<'a> {
    config: &'a ProfilerConfig,
    log_config: LogConfig,
    patterns: Vec<String>,
}

impl<'a> ColumnClassifier<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self {
            config,
            log_config: LogConfig::default(),
            patterns: config
                .id_column_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Classifies all columns, preserving dataset order within each class.
    #[instrument(skip_all, fields(columns = dataset.num_columns()))]
    pub fn classify(&self, dataset: &Dataset) -> ColumnClassification {
        let mut classification = ColumnClassification::default();
        for column in dataset.columns() {
            classification.assign(self.classify_column(column), column.name());
        }

        debug!(
            numeric = classification.numeric.len(),
            categorical = classification.categorical.len(),
            datetime = classification.datetime.len(),
            boolean = classification.boolean.len(),
            id = classification.id.len(),
            "Column classification"
        );
        classification
    }

    /// Classifies a single column.
    pub fn classify_column(&self, column: &Column) -> ColumnClass {
        if self.is_id_column(column) {
            return ColumnClass::Id;
        }
        if column.non_missing_count() == 0 {
            return ColumnClass::Categorical;
        }

        let storage = column.storage();
        if storage.is_numeric() {
            if is_boolean_like(column) {
                ColumnClass::Boolean
            } else {
                ColumnClass::Numeric
            }
        } else if storage.is_temporal() || self.looks_like_datetime(column) {
            ColumnClass::Datetime
        } else {
            ColumnClass::Categorical
        }
    }

    fn is_id_column(&self, column: &Column) -> bool {
        let name = column.name().to_lowercase();
        if let Some(pattern) = self.patterns.iter().find(|p| name.contains(p.as_str())) {
            crate::log_column!(
                self.log_config,
                column = %truncate_field(column.name(), self.log_config.max_field_length),
                pattern = %pattern,
                "Identified ID column by name pattern"
            );
            return true;
        }

        let non_missing = column.non_missing_count();
        if non_missing == 0 {
            return false;
        }

        let ratio = column.distinct_count() as f64 / non_missing as f64;
        if ratio >= self.config.high_cardinality_threshold {
            crate::log_column!(
                self.log_config,
                column = %truncate_field(column.name(), self.log_config.max_field_length),
                unique_ratio = ratio,
                "Identified ID column by cardinality"
            );
            return true;
        }
        false
    }

    fn looks_like_datetime(&self, column: &Column) -> bool {
        let mut sample = column
            .present()
            .take(self.config.datetime_sample_size)
            .peekable();
        if sample.peek().is_none() {
            return false;
        }
        sample.all(|cell| match cell {
            CellValue::Text(text) => parse_datetime(text).is_some(),
            CellValue::Temporal(_) => true,
            _ => false,
        })
    }
}

/// At most two distinct values, all of them 0/1/true/false.
fn is_boolean_like(column: &Column) -> bool {
    let mut distinct = HashSet::new();
    for cell in column.present() {
        distinct.insert(cell.key());
        if distinct.len() > 2 {
            return false;
        }
        match cell.as_f64() {
            Some(v) if v == 0.0 || v == 1.0 => {}
            _ => return false,
        }
    }
    true
}
