//! Flattened Arrow tables for displaying a profile.
//!
//! [`ProfileTables`] turns the nested [`ProfileResult`] into a handful of
//! small record batches, one per report section, that can be printed with
//! [`ProfileTables::render`] or handed to any Arrow-aware consumer.
//!
//! ```rust
//! use insight_profiler::prelude::*;
//! # use std::sync::Arc;
//! # use arrow::array::{Float64Array, StringArray};
//! # use arrow::datatypes::{DataType, Field, Schema};
//! # use arrow::record_batch::RecordBatch;
//! # fn main() -> insight_profiler::error::Result<()> {
//! # let schema = Arc::new(Schema::new(vec![
//! #     Field::new("price", DataType::Float64, false),
//! #     Field::new("color", DataType::Utf8, false),
//! # ]));
//! # let batch = RecordBatch::try_new(schema, vec![
//! #     Arc::new(Float64Array::from(vec![1.0, 2.0, 2.0, 3.0])),
//! #     Arc::new(StringArray::from(vec!["red", "red", "blue", "red"])),
//! # ])?;
//! let result = Profiler::builder().build()?.profile_batch(&batch)?;
//! let tables = result.to_tables()?;
//!
//! assert_eq!(tables.columns.num_rows(), 2);
//! assert!(tables.numeric.is_some());
//! println!("{}", tables.render()?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::analyzers::{NumericStats, ProfileResult};
use crate::error::Result;

/// Column names listed per class in the classification table.
const CLASSIFICATION_PREVIEW: usize = 5;

/// Per-section tables of a profile. Optional sections are `None` when they
/// would be empty.
#[derive(Debug, Clone)]
pub struct ProfileTables {
    pub overview: RecordBatch,
    pub columns: RecordBatch,
    pub classification: RecordBatch,
    pub numeric: Option<RecordBatch>,
    pub outliers: Option<RecordBatch>,
    pub categorical: Option<RecordBatch>,
    pub correlations: Option<RecordBatch>,
    pub quality: RecordBatch,
}

impl ProfileTables {
    pub fn from_result(result: &ProfileResult) -> Result<Self> {
        Ok(Self {
            overview: overview_table(result)?,
            columns: columns_table(result)?,
            classification: classification_table(result)?,
            numeric: numeric_table(result)?,
            outliers: outliers_table(result)?,
            categorical: categorical_table(result)?,
            correlations: correlations_table(result)?,
            quality: quality_table(result)?,
        })
    }

    /// Present tables with their section names, in report order.
    pub fn sections(&self) -> Vec<(&'static str, &RecordBatch)> {
        let mut sections = vec![
            ("overview", &self.overview),
            ("columns", &self.columns),
            ("classification", &self.classification),
        ];
        let optional = [
            ("numeric", self.numeric.as_ref()),
            ("outliers", self.outliers.as_ref()),
            ("categorical", self.categorical.as_ref()),
            ("correlations", self.correlations.as_ref()),
        ];
        sections.extend(
            optional
                .into_iter()
                .filter_map(|(name, table)| table.map(|t| (name, t))),
        );
        sections.push(("quality", &self.quality));
        sections
    }

    /// Pretty-prints every present table under its section name.
    pub fn render(&self) -> Result<String> {
        let mut rendered = Vec::new();
        for (name, table) in self.sections() {
            let body = pretty_format_batches(std::slice::from_ref(table))?;
            rendered.push(format!("{name}\n{body}"));
        }
        Ok(rendered.join("\n\n"))
    }
}

impl ProfileResult {
    /// Flattens the result into display tables.
    pub fn to_tables(&self) -> Result<ProfileTables> {
        ProfileTables::from_result(self)
    }
}

fn batch(fields: Vec<Field>, columns: Vec<ArrayRef>) -> Result<RecordBatch> {
    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        columns,
    )?)
}

fn utf8(name: &str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

fn count(values: impl IntoIterator<Item = usize>) -> ArrayRef {
    Arc::new(UInt64Array::from_iter_values(
        values.into_iter().map(|v| v as u64),
    ))
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Capitalizes the first character.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn overview_table(result: &ProfileResult) -> Result<RecordBatch> {
    let overview = &result.overview;
    batch(
        vec![
            Field::new("rows", DataType::UInt64, false),
            Field::new("columns", DataType::UInt64, false),
            Field::new("memory_usage_mb", DataType::Float64, false),
            utf8("column_names"),
        ],
        vec![
            count([overview.rows]),
            count([overview.columns]),
            Arc::new(Float64Array::from(vec![overview.memory_usage_mb])),
            Arc::new(StringArray::from(vec![overview.column_names.join(", ")])),
        ],
    )
}

fn columns_table(result: &ProfileResult) -> Result<RecordBatch> {
    let (names, classes): (Vec<&str>, Vec<String>) = result
        .columns
        .iter()
        .flat_map(|(class, columns)| {
            columns
                .iter()
                .map(move |name| (name.as_str(), title_case(class.as_str())))
        })
        .unzip();

    batch(
        vec![utf8("Column"), utf8("Type")],
        vec![
            Arc::new(StringArray::from(names)),
            Arc::new(StringArray::from(classes)),
        ],
    )
}

fn classification_table(result: &ProfileResult) -> Result<RecordBatch> {
    let mut classes = Vec::new();
    let mut counts = Vec::new();
    let mut previews = Vec::new();

    for (class, columns) in result.columns.iter() {
        let mut preview = columns
            .iter()
            .take(CLASSIFICATION_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if columns.len() > CLASSIFICATION_PREVIEW {
            preview.push_str("...");
        }
        classes.push(title_case(class.as_str()));
        counts.push(columns.len());
        previews.push(preview);
    }

    batch(
        vec![
            utf8("Type"),
            Field::new("Count", DataType::UInt64, false),
            utf8("Columns"),
        ],
        vec![
            Arc::new(StringArray::from(classes)),
            count(counts),
            Arc::new(StringArray::from(previews)),
        ],
    )
}

fn numeric_table(result: &ProfileResult) -> Result<Option<RecordBatch>> {
    if result.numeric_stats.is_empty() {
        return Ok(None);
    }

    let rows: Vec<_> = result
        .numeric_stats
        .iter()
        .map(|(name, profiled)| (name.as_str(), profiled.stats(), profiled.error()))
        .collect();

    let float = |name: &str| Field::new(name, DataType::Float64, true);
    let uint = |name: &str| Field::new(name, DataType::UInt64, true);

    let floats = |f: &dyn Fn(&NumericStats) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|(_, stats, _)| stats.and_then(f))
                .collect::<Vec<_>>(),
        ))
    };
    let uints = |f: &dyn Fn(&NumericStats) -> usize| -> ArrayRef {
        Arc::new(UInt64Array::from(
            rows.iter()
                .map(|(_, stats, _)| stats.map(|s| f(s) as u64))
                .collect::<Vec<_>>(),
        ))
    };

    let table = batch(
        vec![
            utf8("column"),
            uint("count"),
            uint("missing"),
            float("missing_pct"),
            float("mean"),
            float("median"),
            float("std"),
            float("min"),
            float("max"),
            float("q25"),
            float("q75"),
            float("skewness"),
            float("kurtosis"),
            uint("outlier_count"),
            float("outlier_pct"),
            Field::new("error", DataType::Utf8, true),
        ],
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|(name, _, _)| *name).collect::<Vec<_>>(),
            )),
            uints(&|s| s.count),
            uints(&|s| s.missing),
            floats(&|s| Some(s.missing_pct)),
            floats(&|s| Some(s.mean)),
            floats(&|s| Some(s.median)),
            floats(&|s| s.std),
            floats(&|s| Some(s.min)),
            floats(&|s| Some(s.max)),
            floats(&|s| Some(s.q25)),
            floats(&|s| Some(s.q75)),
            floats(&|s| s.skewness),
            floats(&|s| s.kurtosis),
            uints(&|s| s.outlier_count),
            floats(&|s| Some(s.outlier_pct)),
            Arc::new(StringArray::from(
                rows.iter().map(|(_, _, error)| *error).collect::<Vec<_>>(),
            )),
        ],
    )?;
    Ok(Some(table))
}

fn outliers_table(result: &ProfileResult) -> Result<Option<RecordBatch>> {
    let flagged: Vec<_> = result
        .numeric_stats
        .iter()
        .filter_map(|(name, profiled)| profiled.stats().map(|s| (name, s)))
        .filter(|(_, stats)| stats.outlier_count > 0)
        .collect();

    if flagged.is_empty() {
        return Ok(None);
    }

    let table = batch(
        vec![
            utf8("Column"),
            Field::new("Outliers", DataType::UInt64, false),
            utf8("Percentage"),
        ],
        vec![
            Arc::new(StringArray::from_iter_values(
                flagged.iter().map(|(name, _)| name.as_str()),
            )),
            count(flagged.iter().map(|(_, s)| s.outlier_count)),
            Arc::new(StringArray::from_iter_values(
                flagged.iter().map(|(_, s)| percent(s.outlier_pct)),
            )),
        ],
    )?;
    Ok(Some(table))
}

fn categorical_table(result: &ProfileResult) -> Result<Option<RecordBatch>> {
    if result.categorical_stats.is_empty() {
        return Ok(None);
    }

    let stats = &result.categorical_stats;
    let top_values = stats.values().map(|s| {
        s.top_categories
            .first()
            .map_or_else(|| "N/A".to_string(), |top| top.value.clone())
    });
    let top_freqs = stats.values().map(|s| {
        s.top_categories
            .first()
            .map_or_else(|| "N/A".to_string(), |top| percent(top.percentage))
    });

    let table = batch(
        vec![
            utf8("Column"),
            Field::new("Unique Count", DataType::UInt64, false),
            utf8("Missing %"),
            utf8("Top Value"),
            utf8("Top Freq"),
        ],
        vec![
            Arc::new(StringArray::from_iter_values(stats.keys())),
            count(stats.values().map(|s| s.unique_count)),
            Arc::new(StringArray::from_iter_values(
                stats.values().map(|s| percent(s.missing_pct)),
            )),
            Arc::new(StringArray::from_iter_values(top_values)),
            Arc::new(StringArray::from_iter_values(top_freqs)),
        ],
    )?;
    Ok(Some(table))
}

fn correlations_table(result: &ProfileResult) -> Result<Option<RecordBatch>> {
    let strong = &result.correlations.strong_correlations;
    if strong.is_empty() {
        return Ok(None);
    }

    let table = batch(
        vec![
            utf8("Column 1"),
            utf8("Column 2"),
            Field::new("Correlation", DataType::Float64, false),
            utf8("Type"),
        ],
        vec![
            Arc::new(StringArray::from_iter_values(
                strong.iter().map(|c| c.column1.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                strong.iter().map(|c| c.column2.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                strong.iter().map(|c| c.correlation),
            )),
            Arc::new(StringArray::from_iter_values(
                strong.iter().map(|c| title_case(&c.strength.to_string())),
            )),
        ],
    )?;
    Ok(Some(table))
}

fn quality_table(result: &ProfileResult) -> Result<RecordBatch> {
    let quality = &result.data_quality;
    batch(
        vec![
            Field::new("Duplicate Rows", DataType::UInt64, false),
            Field::new("Duplicate %", DataType::Float64, false),
            Field::new("Constant Columns", DataType::UInt64, false),
            Field::new("High Missing Columns", DataType::UInt64, false),
        ],
        vec![
            count([quality.duplicate_rows]),
            Arc::new(Float64Array::from(vec![quality.duplicate_rows_pct])),
            count([quality.constant_columns.len()]),
            count([quality.high_missing_columns.len()]),
        ],
    )
}
