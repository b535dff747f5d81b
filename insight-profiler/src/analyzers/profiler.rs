//! Profile orchestration.
//!
//! A [`Profiler`] runs four stages over one immutable [`Dataset`]:
//!
//! 1. **Classification**: every column gets exactly one
//!    [`ColumnClass`](super::ColumnClass).
//! 2. **Statistics**: numeric, categorical and datetime statistics, each over
//!    the columns of its class.
//! 3. **Correlation**: pairwise Pearson correlation over numeric columns.
//! 4. **Quality**: duplicate rows, constant and mostly-missing columns.
//!
//! Only an empty dataset fails a run. Per-column failures become error
//! markers ([`Profiled::Unavailable`]) in the result.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Float64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use insight_profiler::analyzers::Profiler;
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("price", DataType::Float64, true),
//!     Field::new("city", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Float64Array::from(vec![1.0, 2.0, 2.0, 40.0])),
//!         Arc::new(StringArray::from(vec!["Oslo", "Lima", "Oslo", "Oslo"])),
//!     ],
//! )
//! .unwrap();
//!
//! let profiler = Profiler::builder()
//!     .correlation_threshold(0.8)
//!     .top_categories_count(3)
//!     .build()
//!     .unwrap();
//! let result = profiler.profile_batch(&batch).unwrap();
//!
//! assert_eq!(result.columns.numeric, vec!["price"]);
//! assert_eq!(result.categorical_stats["city"].top_categories[0].value, "Oslo");
//! ```

use std::sync::Arc;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;
use tracing::{info, instrument, warn};

use super::categorical::CategoricalStatistician;
use super::classifier::ColumnClassifier;
use super::correlation::CorrelationAnalyzer;
use super::datetime::DatetimeStatistician;
use super::numeric::NumericStatistician;
use super::quality::QualityAuditor;
use super::profile_types::{
    CategoricalStats, ColumnClassification, DatetimeStats, NumericStats, Overview,
    ProfileResult, Profiled,
};
use crate::config::{OutlierMethod, ProfilerConfig};
use crate::dataset::Dataset;
use crate::error::{ProfileError, Result};
use crate::logging::{truncate_field, LogConfig};

const TOTAL_STAGES: u8 = 4;

/// Progress callback for profile runs
pub type ProgressCallback = Arc<dyn Fn(ProfilerProgress) + Send + Sync>;

/// The four stages of a profile run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStage {
    Classification,
    Statistics,
    Correlation,
    Quality,
}

impl ProfileStage {
    fn number(self) -> u8 {
        match self {
            Self::Classification => 1,
            Self::Statistics => 2,
            Self::Correlation => 3,
            Self::Quality => 4,
        }
    }
}

impl std::fmt::Display for ProfileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Classification => "classification",
            Self::Statistics => "statistics",
            Self::Correlation => "correlation",
            Self::Quality => "quality",
        };
        f.write_str(name)
    }
}

/// Progress information during a profile run
#[derive(Debug, Clone)]
pub struct ProfilerProgress {
    pub stage: ProfileStage,
    pub current_stage: u8,
    pub total_stages: u8,
    pub message: String,
}

/// Builder for [`Profiler`]
pub struct ProfilerBuilder {
    config: ProfilerConfig,
    log_config: LogConfig,
    progress_callback: Option<ProgressCallback>,
}

impl ProfilerBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the name patterns that mark identifier columns
    pub fn id_column_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.id_column_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the distinct-value ratio that marks identifier columns
    pub fn high_cardinality_threshold(mut self, threshold: f64) -> Self {
        self.config.high_cardinality_threshold = threshold;
        self
    }

    /// Set the minimum |r| of a strong correlation
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.config.correlation_threshold = threshold;
        self
    }

    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.config.outlier_method = method;
        self
    }

    /// Set the IQR multiplier of the outlier fences
    pub fn outlier_multiplier(mut self, multiplier: f64) -> Self {
        self.config.outlier_multiplier = multiplier;
        self
    }

    /// Set the missing fraction that flags a column
    pub fn high_missing_threshold(mut self, threshold: f64) -> Self {
        self.config.high_missing_threshold = threshold;
        self
    }

    /// Set how many top categories are kept per categorical column
    pub fn top_categories_count(mut self, count: usize) -> Self {
        self.config.top_categories_count = count;
        self
    }

    /// Set how many values are tried as dates during classification
    pub fn datetime_sample_size(mut self, size: usize) -> Self {
        self.config.datetime_sample_size = size;
        self
    }

    /// Set logging verbosity
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Set progress callback
    pub fn progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProfilerProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Validate the configuration and build the Profiler
    pub fn build(self) -> Result<Profiler> {
        self.config.validate()?;
        Ok(Profiler {
            config: self.config,
            log_config: self.log_config,
            progress_callback: self.progress_callback,
        })
    }
}

/// Runs the profiling stages over datasets.
///
/// The configuration is validated at construction and never changes
/// afterwards, so one Profiler can profile any number of datasets.
#[derive(Clone)]
pub struct Profiler {
    config: ProfilerConfig,
    log_config: LogConfig,
    progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("config", &self.config)
            .field("log_config", &self.log_config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Profiler {
    /// Create a new builder with default configuration
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder {
            config: ProfilerConfig::default(),
            log_config: LogConfig::default(),
            progress_callback: None,
        }
    }

    /// Create a Profiler from a configuration, validating it first
    pub fn new(config: ProfilerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Materializes a record batch and profiles it.
    pub fn profile_batch(&self, batch: &RecordBatch) -> Result<ProfileResult> {
        let dataset = Dataset::try_from_batch(batch)?;
        self.profile(&dataset)
    }

    /// Profiles a dataset.
    ///
    /// Fails only with [`ProfileError::InputShape`] when the dataset has no
    /// rows or no columns.
    #[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
    pub fn profile(&self, dataset: &Dataset) -> Result<ProfileResult> {
        if dataset.num_rows() == 0 || dataset.num_columns() == 0 {
            return Err(ProfileError::InputShape {
                rows: dataset.num_rows(),
                columns: dataset.num_columns(),
            });
        }

        let start_time = Instant::now();
        info!(
            rows = dataset.num_rows(),
            columns = dataset.num_columns(),
            "Starting data profiling"
        );

        self.report_progress(ProfileStage::Classification, "Classifying columns");
        let columns = ColumnClassifier::new(&self.config)
            .with_log_config(self.log_config.clone())
            .classify(dataset);
        info!(
            numeric = columns.numeric.len(),
            categorical = columns.categorical.len(),
            datetime = columns.datetime.len(),
            boolean = columns.boolean.len(),
            id = columns.id.len(),
            "Column classification complete"
        );

        self.report_progress(ProfileStage::Statistics, "Computing column statistics");
        let numeric_stats = self.numeric_stats(dataset, &columns);
        let categorical_stats = self.categorical_stats(dataset, &columns);
        let datetime_stats = self.datetime_stats(dataset, &columns);

        self.report_progress(ProfileStage::Correlation, "Computing correlations");
        let correlations =
            CorrelationAnalyzer::new(&self.config).analyze(dataset, &columns.numeric);

        self.report_progress(ProfileStage::Quality, "Checking data quality");
        let data_quality = QualityAuditor::new(&self.config).audit(dataset);

        let overview = Overview {
            rows: dataset.num_rows(),
            columns: dataset.num_columns(),
            memory_usage_mb: dataset.estimated_memory_bytes() as f64 / (1024.0 * 1024.0),
            column_names: dataset.column_names(),
        };

        crate::log_stage!(
            self.log_config,
            time_ms = start_time.elapsed().as_millis() as u64,
            strong_correlations = correlations.strong_correlations.len(),
            duplicate_rows = data_quality.duplicate_rows,
            "Data profiling completed"
        );

        Ok(ProfileResult {
            overview,
            columns,
            numeric_stats,
            categorical_stats,
            datetime_stats,
            correlations,
            data_quality,
        })
    }

    #[instrument(skip_all, fields(columns = columns.numeric.len()))]
    fn numeric_stats(
        &self,
        dataset: &Dataset,
        columns: &ColumnClassification,
    ) -> IndexMap<String, Profiled<NumericStats>> {
        let statistician = NumericStatistician::new(&self.config);
        columns
            .numeric
            .iter()
            .filter_map(|name| dataset.column(name))
            .map(|column| {
                let profiled = Profiled::from(statistician.profile(column));
                self.warn_unavailable(column.name(), &profiled);
                (column.name().to_string(), profiled)
            })
            .collect()
    }

    #[instrument(skip_all, fields(columns = columns.categorical.len()))]
    fn categorical_stats(
        &self,
        dataset: &Dataset,
        columns: &ColumnClassification,
    ) -> IndexMap<String, CategoricalStats> {
        let statistician = CategoricalStatistician::new(&self.config);
        columns
            .categorical
            .iter()
            .filter_map(|name| dataset.column(name))
            .map(|column| (column.name().to_string(), statistician.profile(column)))
            .collect()
    }

    #[instrument(skip_all, fields(columns = columns.datetime.len()))]
    fn datetime_stats(
        &self,
        dataset: &Dataset,
        columns: &ColumnClassification,
    ) -> IndexMap<String, Profiled<DatetimeStats>> {
        let statistician = DatetimeStatistician::new();
        columns
            .datetime
            .iter()
            .filter_map(|name| dataset.column(name))
            .map(|column| {
                let profiled = Profiled::from(statistician.profile(column));
                self.warn_unavailable(column.name(), &profiled);
                (column.name().to_string(), profiled)
            })
            .collect()
    }

    fn warn_unavailable<T>(&self, column: &str, profiled: &Profiled<T>) {
        if let Some(error) = profiled.error() {
            warn!(
                column = %truncate_field(column, self.log_config.max_field_length),
                error,
                "Column statistics unavailable"
            );
        }
    }

    fn report_progress(&self, stage: ProfileStage, message: &str) {
        crate::log_stage!(self.log_config, stage = %stage, "{message}");
        if let Some(ref callback) = self.progress_callback {
            callback(ProfilerProgress {
                stage,
                current_stage: stage.number(),
                total_stages: TOTAL_STAGES,
                message: message.to_string(),
            });
        }
    }
}
