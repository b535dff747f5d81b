//! Error types for the insight profiler.
//!
//! Only failures that make a whole profile run meaningless live here: a
//! dataset of the wrong shape, an invalid configuration, or a dataset that
//! cannot be materialized. Failures that affect a single column are modelled
//! by [`crate::analyzers::ColumnError`] and never escape a run.

use thiserror::Error;

/// The main error type for the profiler.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The dataset has no rows or no columns.
    #[error("Dataset must have at least one row and one column (got {rows} rows, {columns} columns)")]
    InputShape {
        /// Number of rows in the rejected dataset
        rows: usize,
        /// Number of columns in the rejected dataset
        columns: usize,
    },

    /// A recognized configuration option has an out-of-range value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two columns share the same name.
    #[error("Column '{column}' appears more than once in the dataset")]
    DuplicateColumn { column: String },

    /// Columns of a snapshot must all have the same number of cells.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error while rendering a report.
    #[error("Format error: {0}")]
    Format(String),
}

/// A type alias for `Result<T, ProfileError>`.
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true for errors raised before any profiling stage runs.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            Self::InputShape { .. } | Self::DuplicateColumn { .. } | Self::ColumnLengthMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ProfileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for ProfileError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Format(err.to_string())
    }
}
