//! Profiling stages and the [`Profiler`] that runs them.
//!
//! ## Stages
//!
//! - **Column Classifier** ([`ColumnClassifier`]): assigns each column one of
//!   `numeric`, `categorical`, `datetime`, `boolean` or `id`
//! - **Statisticians** ([`NumericStatistician`], [`CategoricalStatistician`],
//!   [`DatetimeStatistician`]): descriptive statistics per column class
//! - **Correlation Analyzer** ([`CorrelationAnalyzer`]): pairwise Pearson
//!   correlation over numeric columns
//! - **Quality Auditor** ([`QualityAuditor`]): duplicates, constant and
//!   mostly-missing columns
//!
//! Each stage can be used on its own, but most callers only need
//! [`Profiler::profile`].

pub mod categorical;
pub mod classifier;
pub mod correlation;
pub mod datetime;
pub mod errors;
pub mod numeric;
pub mod profile_types;
pub mod profiler;
pub mod quality;

pub use categorical::CategoricalStatistician;
pub use classifier::ColumnClassifier;
pub use correlation::CorrelationAnalyzer;
pub use datetime::{DatetimeStatistician, UNKNOWN_FREQUENCY};
pub use errors::{ColumnError, ColumnResult};
pub use numeric::NumericStatistician;
pub use profile_types::{
    CategoricalStats, CategoryFrequency, ColumnClass, ColumnClassification, CorrelationMatrix,
    CorrelationReport, CorrelationStrength, DatetimeStats, HighMissingColumn, NumericStats,
    Overview, ProfileResult, Profiled, QualityReport, StrongCorrelation,
};
pub use profiler::{ProfileStage, Profiler, ProfilerBuilder, ProfilerProgress, ProgressCallback};
pub use quality::QualityAuditor;

/// `part / whole`, or zero for an empty whole.
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// `part / whole` in percent, or zero for an empty whole.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part, whole) * 100.0
}
