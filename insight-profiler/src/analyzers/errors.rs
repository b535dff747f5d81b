//! Column-level failures.
//!
//! A [`ColumnError`] never aborts a profile run. The stage that hits it
//! replaces the column's statistics with [`Profiled::Unavailable`] carrying
//! the error message, and the run continues with the next column.
//!
//! [`Profiled::Unavailable`]: super::Profiled::Unavailable

use thiserror::Error;

/// Result type for per-column statistics.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Errors localized to a single column.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// Every value of a numeric column is missing.
    #[error("No non-null values")]
    NoNonNullValues,

    /// No value of a datetime column could be coerced to a timestamp.
    #[error("No valid datetime values")]
    NoValidDatetimes,

    /// A statistic could not be computed.
    #[error("Computation failed: {0}")]
    Computation(String),
}

impl ColumnError {
    /// Creates a computation error with the given message.
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_messages() {
        assert_eq!(ColumnError::NoNonNullValues.to_string(), "No non-null values");
        assert_eq!(
            ColumnError::NoValidDatetimes.to_string(),
            "No valid datetime values"
        );
        assert_eq!(
            ColumnError::computation("non-finite mean").to_string(),
            "Computation failed: non-finite mean"
        );
    }
}
