//! Prelude for commonly used types in insight-profiler.

pub use crate::analyzers::{
    ColumnClass, ColumnClassification, ProfileResult, Profiled, Profiler, ProfilerBuilder,
    ProfilerProgress,
};
pub use crate::config::{OutlierMethod, ProfilerConfig};
pub use crate::dataset::{CellValue, Column, Dataset, StorageType};
pub use crate::error::{ProfileError, Result};
pub use crate::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ProfileFormatter,
};
pub use crate::logging::LogConfig;
pub use crate::summary::ProfileSummary;
pub use crate::views::ProfileTables;
