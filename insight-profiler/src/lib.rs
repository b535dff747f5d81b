//! # Insight Profiler - Statistical profiling for tabular data
//!
//! Insight Profiler takes an Apache Arrow table, classifies its columns,
//! computes descriptive statistics per column class, discovers correlated
//! numeric columns and audits overall data quality. The result is a single
//! [`ProfileResult`](analyzers::ProfileResult) that serializes to JSON and
//! flattens into Arrow tables for display.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Float64Array, Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use insight_profiler::prelude::*;
//!
//! # fn main() -> insight_profiler::error::Result<()> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("order_id", DataType::Int64, false),
//!     Field::new("amount", DataType::Float64, true),
//!     Field::new("status", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2, 3, 4, 5, 6])),
//!         Arc::new(Float64Array::from(vec![10.0, 12.5, 12.5, 9.0, 11.0, 250.0])),
//!         Arc::new(StringArray::from(vec![
//!             "shipped", "shipped", "pending", "shipped", "returned", "shipped",
//!         ])),
//!     ],
//! )?;
//!
//! let dataset = Dataset::try_from_batch(&batch)?;
//! let profiler = Profiler::builder().outlier_multiplier(1.5).build()?;
//! let result = profiler.profile(&dataset)?;
//!
//! assert_eq!(result.columns.id, vec!["order_id"]);
//! assert_eq!(result.columns.numeric, vec!["amount"]);
//! assert_eq!(result.columns.categorical, vec!["status"]);
//!
//! let amount = result.numeric_stats["amount"].stats().unwrap();
//! assert_eq!(amount.outlier_count, 1);
//!
//! // Compact JSON for downstream prompt construction
//! let summary = result.to_summary_json()?;
//! assert!(summary.contains("\"sample_statistics\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`dataset`**: immutable, typed snapshot of an Arrow table
//! - **`analyzers`**: the classifier, the statisticians, the correlation
//!   analyzer, the quality auditor and the [`Profiler`](analyzers::Profiler)
//!   that runs them
//! - **`config`**: validated thresholds, loadable from YAML
//! - **`summary`** / **`views`**: the compact JSON view and flattened Arrow
//!   tables
//! - **`formatters`**: JSON, console and Markdown reports
//! - **`logging`**: `tracing` helpers and subscriber setup for binaries
//!
//! ## Failure model
//!
//! Only an empty dataset or an invalid configuration fails. Problems with a
//! single column, such as a numeric column with no values, become an
//! `{"error": "..."}` marker in that column's entry and the run continues.

pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod summary;
pub mod temporal;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
