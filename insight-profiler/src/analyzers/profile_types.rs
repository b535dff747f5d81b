//! Data structures produced by a profile run.
//!
//! Field names follow the JSON layout downstream consumers read, so every
//! type here serializes with `serde` into the same shape the report
//! renderers and prompt builders expect.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::ColumnResult;

/// Semantic class assigned to every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnClass {
    Numeric,
    Categorical,
    Datetime,
    Boolean,
    Id,
}

impl ColumnClass {
    /// All classes in reporting order.
    pub const ALL: [ColumnClass; 5] = [
        ColumnClass::Numeric,
        ColumnClass::Categorical,
        ColumnClass::Datetime,
        ColumnClass::Boolean,
        ColumnClass::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Boolean => "boolean",
            Self::Id => "id",
        }
    }
}

impl std::fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partition of the dataset's columns into the five classes.
///
/// Each class lists its columns in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub datetime: Vec<String>,
    pub boolean: Vec<String>,
    pub id: Vec<String>,
}

impl ColumnClassification {
    /// Columns assigned to `class`.
    pub fn columns(&self, class: ColumnClass) -> &[String] {
        match class {
            ColumnClass::Numeric => &self.numeric,
            ColumnClass::Categorical => &self.categorical,
            ColumnClass::Datetime => &self.datetime,
            ColumnClass::Boolean => &self.boolean,
            ColumnClass::Id => &self.id,
        }
    }

    pub(crate) fn assign(&mut self, class: ColumnClass, column: impl Into<String>) {
        let bucket = match class {
            ColumnClass::Numeric => &mut self.numeric,
            ColumnClass::Categorical => &mut self.categorical,
            ColumnClass::Datetime => &mut self.datetime,
            ColumnClass::Boolean => &mut self.boolean,
            ColumnClass::Id => &mut self.id,
        };
        bucket.push(column.into());
    }

    /// Class of a column, if it was classified.
    pub fn class_of(&self, column: &str) -> Option<ColumnClass> {
        ColumnClass::ALL
            .into_iter()
            .find(|class| self.columns(*class).iter().any(|c| c == column))
    }

    /// Iterates over `(class, columns)` in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnClass, &[String])> + '_ {
        ColumnClass::ALL
            .into_iter()
            .map(move |class| (class, self.columns(class)))
    }

    /// Total number of classified columns.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, columns)| columns.len()).sum()
    }
}

/// High-level description of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    /// Estimated size of the materialized snapshot, in MiB
    pub memory_usage_mb: f64,
    pub column_names: Vec<String>,
}

/// Statistics of a column, or the marker explaining why there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Profiled<T> {
    Stats(T),
    Unavailable { error: String },
}

impl<T> Profiled<T> {
    pub fn stats(&self) -> Option<&T> {
        match self {
            Self::Stats(stats) => Some(stats),
            Self::Unavailable { .. } => None,
        }
    }

    /// The error marker, if the statistics are unavailable.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Stats(_) => None,
            Self::Unavailable { error } => Some(error),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Stats(_))
    }
}

impl<T> From<ColumnResult<T>> for Profiled<T> {
    fn from(result: ColumnResult<T>) -> Self {
        match result {
            Ok(stats) => Self::Stats(stats),
            Err(err) => Self::Unavailable {
                error: err.to_string(),
            },
        }
    }
}

/// Descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Non-missing values
    pub count: usize,
    pub missing: usize,
    /// Missing values as a percentage of all rows
    pub missing_pct: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` for a single value
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
    pub skewness: Option<f64>,
    /// Excess kurtosis
    pub kurtosis: Option<f64>,
    pub outlier_count: usize,
    /// Outliers as a percentage of non-missing values
    pub outlier_pct: f64,
}

/// One entry of a categorical column's frequency ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub value: String,
    pub count: usize,
    /// Share of non-missing values, in percent
    pub percentage: f64,
}

/// Descriptive statistics of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub count: usize,
    pub missing: usize,
    pub missing_pct: f64,
    pub unique_count: usize,
    pub top_categories: Vec<CategoryFrequency>,
    /// Shannon entropy (natural log) over all distinct values
    pub entropy: f64,
}

/// Descriptive statistics of a datetime column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeStats {
    /// Values that are present and coerce to a timestamp
    pub count: usize,
    /// Values that are missing or fail coercion
    pub missing: usize,
    pub missing_pct: f64,
    pub min_date: NaiveDateTime,
    pub max_date: NaiveDateTime,
    pub range_days: i64,
    pub inferred_frequency: Option<String>,
}

/// Direction of a strong correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Positive,
    Negative,
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// A pair of numeric columns whose |r| meets the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub column1: String,
    pub column2: String,
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

/// Pearson correlation matrix keyed by column name, `None` where undefined.
pub type CorrelationMatrix = IndexMap<String, IndexMap<String, Option<f64>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    /// Sorted by descending |correlation|
    pub strong_correlations: Vec<StrongCorrelation>,
}

impl CorrelationReport {
    /// Correlation between two columns, if defined.
    pub fn get(&self, column1: &str, column2: &str) -> Option<f64> {
        self.matrix.get(column1)?.get(column2).copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighMissingColumn {
    pub column: String,
    pub missing_pct: f64,
}

/// Table-wide data quality findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub duplicate_rows: usize,
    pub duplicate_rows_pct: f64,
    pub constant_columns: Vec<String>,
    pub high_missing_columns: Vec<HighMissingColumn>,
}

impl QualityReport {
    /// True when no quality rule fired.
    pub fn is_clean(&self) -> bool {
        self.duplicate_rows == 0
            && self.constant_columns.is_empty()
            && self.high_missing_columns.is_empty()
    }
}

/// Complete result of one profile run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub overview: Overview,
    pub columns: ColumnClassification,
    pub numeric_stats: IndexMap<String, Profiled<NumericStats>>,
    pub categorical_stats: IndexMap<String, CategoricalStats>,
    pub datetime_stats: IndexMap<String, Profiled<DatetimeStats>>,
    pub correlations: CorrelationReport,
    pub data_quality: QualityReport,
}

impl ProfileResult {
    /// Serializes the complete result as pretty JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
