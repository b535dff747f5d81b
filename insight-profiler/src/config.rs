//! Profiler configuration.
//!
//! [`ProfilerConfig`] holds every threshold the profiling stages read. It is
//! validated once, when a [`crate::analyzers::Profiler`] is constructed, and
//! is read-only afterwards.
//!
//! Configuration can be built in code, through the profiler builder, or
//! loaded from the `profiling:` section of an application YAML file:
//!
//! ```rust
//! use insight_profiler::config::ProfilerConfig;
//!
//! let yaml = r#"
//! app:
//!   name: Data Insight
//! profiling:
//!   correlation_threshold: 0.8
//!   top_categories_count: 5
//! "#;
//!
//! let config = ProfilerConfig::from_yaml_str(yaml).unwrap();
//! assert_eq!(config.correlation_threshold, 0.8);
//! assert_eq!(config.top_categories_count, 5);
//! assert_eq!(config.outlier_multiplier, 1.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Outlier detection rule applied to numeric columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierMethod {
    /// Tukey fences at `Q1 - k*IQR` and `Q3 + k*IQR`
    #[default]
    #[serde(rename = "IQR", alias = "iqr")]
    Iqr,
}

/// Thresholds and options for one profiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Case-insensitive substrings that mark a column name as an identifier
    pub id_column_patterns: Vec<String>,
    /// Distinct-to-non-missing ratio at or above which a column is an identifier
    pub high_cardinality_threshold: f64,
    /// Minimum |r| for a pair to be reported as strongly correlated
    pub correlation_threshold: f64,
    pub outlier_method: OutlierMethod,
    /// The `k` in the Tukey fences
    pub outlier_multiplier: f64,
    /// Missing fraction at or above which a column is flagged
    pub high_missing_threshold: f64,
    /// Number of most frequent values kept per categorical column
    pub top_categories_count: usize,
    /// Number of leading non-missing values tried as dates during classification
    pub datetime_sample_size: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            id_column_patterns: vec!["id".to_string(), "index".to_string(), "key".to_string()],
            high_cardinality_threshold: 0.95,
            correlation_threshold: 0.6,
            outlier_method: OutlierMethod::Iqr,
            outlier_multiplier: 1.5,
            high_missing_threshold: 0.5,
            top_categories_count: 10,
            datetime_sample_size: 100,
        }
    }
}

/// Application document layout; only the profiling section is read.
#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    profiling: Option<ProfilerConfig>,
}

impl ProfilerConfig {
    /// Checks every option against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.id_column_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ProfileError::configuration(
                "id_column_patterns must not contain empty patterns",
            ));
        }

        check_finite("high_cardinality_threshold", self.high_cardinality_threshold)?;
        if self.high_cardinality_threshold <= 0.0 || self.high_cardinality_threshold > 1.0 {
            return Err(ProfileError::configuration(format!(
                "high_cardinality_threshold must be within (0, 1], got {}",
                self.high_cardinality_threshold
            )));
        }

        check_unit_interval("correlation_threshold", self.correlation_threshold)?;
        check_unit_interval("high_missing_threshold", self.high_missing_threshold)?;

        check_finite("outlier_multiplier", self.outlier_multiplier)?;
        if self.outlier_multiplier < 0.0 {
            return Err(ProfileError::configuration(format!(
                "outlier_multiplier must not be negative, got {}",
                self.outlier_multiplier
            )));
        }

        if self.top_categories_count == 0 {
            return Err(ProfileError::configuration(
                "top_categories_count must be at least 1",
            ));
        }
        if self.datetime_sample_size == 0 {
            return Err(ProfileError::configuration(
                "datetime_sample_size must be at least 1",
            ));
        }

        Ok(())
    }

    /// Reads the `profiling:` section of a YAML document.
    ///
    /// Missing keys (or a missing section) fall back to defaults. The result
    /// is validated before it is returned.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Option<ConfigDocument> = serde_yaml::from_str(yaml)?;
        let config = document
            .and_then(|doc| doc.profiling)
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Reads the `profiling:` section of a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProfileError::configuration(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::configuration(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
