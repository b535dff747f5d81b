//! Compact view of a profile for prompt construction.
//!
//! [`ProfileSummary`] keeps the overview, the column classes, a handful of
//! headline numbers per numeric and categorical column, the strong
//! correlations and the quality findings. Datetime statistics and the full
//! correlation matrix are left out.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzers::{
    ColumnClassification, Overview, ProfileResult, QualityReport, StrongCorrelation,
};
use crate::error::Result;

/// Number of top category values kept per categorical column.
const SUMMARY_TOP_VALUES: usize = 3;

/// Headline statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnSummary {
    /// Values are `None` when the column carries an error marker
    Numeric {
        mean: Option<f64>,
        median: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Categorical {
        unique_count: usize,
        top_values: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub overview: Overview,
    pub column_types: ColumnClassification,
    /// Numeric columns first, then categorical columns
    pub sample_statistics: IndexMap<String, ColumnSummary>,
    pub strong_correlations: Vec<StrongCorrelation>,
    pub data_quality: QualityReport,
}

impl From<&ProfileResult> for ProfileSummary {
    fn from(result: &ProfileResult) -> Self {
        let mut sample_statistics = IndexMap::new();

        for (column, profiled) in &result.numeric_stats {
            let stats = profiled.stats();
            sample_statistics.insert(
                column.clone(),
                ColumnSummary::Numeric {
                    mean: stats.map(|s| s.mean),
                    median: stats.map(|s| s.median),
                    std: stats.and_then(|s| s.std),
                    min: stats.map(|s| s.min),
                    max: stats.map(|s| s.max),
                },
            );
        }

        for (column, stats) in &result.categorical_stats {
            sample_statistics.insert(
                column.clone(),
                ColumnSummary::Categorical {
                    unique_count: stats.unique_count,
                    top_values: stats
                        .top_categories
                        .iter()
                        .take(SUMMARY_TOP_VALUES)
                        .map(|c| c.value.clone())
                        .collect(),
                },
            );
        }

        Self {
            overview: result.overview.clone(),
            column_types: result.columns.clone(),
            sample_statistics,
            strong_correlations: result.correlations.strong_correlations.clone(),
            data_quality: result.data_quality.clone(),
        }
    }
}

impl ProfileSummary {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ProfileResult {
    /// Builds the compact summary view.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary::from(self)
    }

    /// Renders the compact summary view as pretty JSON.
    pub fn to_summary_json(&self) -> Result<String> {
        self.summary().to_json_pretty()
    }
}
