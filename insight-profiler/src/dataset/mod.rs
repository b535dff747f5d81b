//! Immutable, typed snapshot of a tabular dataset.
//!
//! A [`Dataset`] is materialized once from Arrow record batches (or built
//! directly from [`Column`]s) and is only read afterwards. Every cell is a
//! [`CellValue`], with [`CellValue::Missing`] as the explicit missing marker.
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Float64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use insight_profiler::dataset::{Dataset, StorageType};
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("price", DataType::Float64, true),
//!     Field::new("city", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Float64Array::from(vec![Some(1.5), None, Some(f64::NAN)])),
//!         Arc::new(StringArray::from(vec![Some("Oslo"), Some("Lima"), None])),
//!     ],
//! )
//! .unwrap();
//!
//! let dataset = Dataset::try_from_batch(&batch).unwrap();
//! assert_eq!(dataset.num_rows(), 3);
//! let price = dataset.column("price").unwrap();
//! assert_eq!(price.storage(), StorageType::Float);
//! assert_eq!(price.missing_count(), 2); // null and NaN
//! ```

mod convert;

use std::collections::HashSet;
use std::fmt;
use std::mem::size_of;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Physical storage type of a column, derived from its Arrow data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Whole numbers
    Integer,
    /// Floating point and decimal numbers
    Float,
    /// True/false values
    Boolean,
    /// Dates and timestamps
    Temporal,
    /// Strings
    Text,
    /// Any other Arrow type, rendered to text
    Other,
}

impl StorageType {
    /// Returns true for storage a dataframe library would call numeric.
    ///
    /// Booleans count as numeric, so boolean columns reach the boolean
    /// special case of the classifier.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Boolean)
    }

    /// Returns true for date and timestamp storage.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Temporal)
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Explicit missing marker (null, or NaN in float storage)
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Temporal(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Returns true if this cell is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell; booleans map to 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Text view of the cell, for text storage only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Timestamp view of the cell, for temporal storage only.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Temporal(v) => Some(*v),
            _ => None,
        }
    }

    /// Hashable identity of the cell used for distinct counts and row equality.
    pub fn key(&self) -> CellKey<'_> {
        match self {
            Self::Missing => CellKey::Missing,
            Self::Integer(v) => CellKey::Integer(*v),
            // -0.0 and 0.0 compare equal, so they must hash equal too.
            Self::Float(v) if *v == 0.0 => CellKey::Float(0.0f64.to_bits()),
            Self::Float(v) => CellKey::Float(v.to_bits()),
            Self::Boolean(v) => CellKey::Boolean(*v),
            Self::Temporal(v) => CellKey::Temporal(*v),
            Self::Text(v) => CellKey::Text(v.as_str()),
        }
    }

    /// Rough in-memory size of the cell, including owned text.
    fn estimated_size(&self) -> usize {
        match self {
            Self::Text(v) => size_of::<Self>() + v.capacity(),
            _ => size_of::<Self>(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "null"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Temporal(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Borrowed, hashable identity of a [`CellValue`].
///
/// Missing markers are equal to each other. Floats compare by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Missing,
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Temporal(NaiveDateTime),
    Text(&'a str),
}

/// One named column of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    storage: StorageType,
    cells: Vec<CellValue>,
}

impl Column {
    /// Creates a column from already typed cells.
    pub fn new(name: impl Into<String>, storage: StorageType, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            storage,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> StorageType {
        self.storage
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Total number of cells, missing included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &CellValue> + '_ {
        self.cells.iter().filter(|cell| !cell.is_missing())
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_missing()).count()
    }

    pub fn non_missing_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        self.present().map(CellValue::key).collect::<HashSet<_>>().len()
    }

    /// Non-missing values as floats, in row order. Empty for non-numeric storage.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.present().filter_map(CellValue::as_f64).collect()
    }
}

/// Immutable snapshot of a table: ordered, uniquely named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Dataset {
    /// Builds a dataset from typed columns.
    ///
    /// All columns must have the same length and distinct names. An empty
    /// column list yields an empty dataset; the profiler rejects it later.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ProfileError::DuplicateColumn {
                    column: column.name().to_string(),
                });
            }
            if column.len() != num_rows {
                return Err(ProfileError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: num_rows,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, num_rows })
    }

    /// Materializes a single Arrow record batch.
    pub fn try_from_batch(batch: &RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| convert::column_from_array(field.name(), array))
            .collect::<Result<Vec<_>>>()?;

        let mut dataset = Self::from_columns(columns)?;
        // A zero-column batch still knows its row count.
        dataset.num_rows = batch.num_rows();
        Ok(dataset)
    }

    /// Materializes several record batches that share `schema`.
    pub fn try_from_batches(schema: &SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let combined = arrow::compute::concat_batches(schema, batches)?;
        Self::try_from_batch(&combined)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks a column up by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Estimated memory held by the snapshot, in bytes.
    pub fn estimated_memory_bytes(&self) -> usize {
        self.columns
            .iter()
            .map(|column| {
                column.name.capacity()
                    + column
                        .cells
                        .iter()
                        .map(CellValue::estimated_size)
                        .sum::<usize>()
            })
            .sum()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.columns.iter().map(move |column| &column.cells[index])
    }
}

impl TryFrom<&RecordBatch> for Dataset {
    type Error = ProfileError;

    fn try_from(batch: &RecordBatch) -> Result<Self> {
        Self::try_from_batch(batch)
    }
}
