//! Pairwise Pearson correlation between numeric columns.
//!
//! Each pair is computed over the rows where both columns have a value
//! (pairwise complete observations). A pair is undefined, and reported as
//! `None`, when fewer than two such rows exist or either side has zero
//! variance over them.

use indexmap::IndexMap;
use tracing::instrument;

use super::profile_types::{
    CorrelationMatrix, CorrelationReport, CorrelationStrength, StrongCorrelation,
};
use crate::config::ProfilerConfig;
use crate::dataset::{CellValue, Dataset};

/// Builds the [`CorrelationReport`] for the numeric columns of a dataset.
pub struct CorrelationAnalyzer<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> CorrelationAnalyzer<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    /// Correlates the named columns.
    ///
    /// Fewer than two columns produce an empty report. Names that are not
    /// in the dataset are skipped.
    #[instrument(skip_all, fields(columns = numeric_columns.len()))]
    pub fn analyze(&self, dataset: &Dataset, numeric_columns: &[String]) -> CorrelationReport {
        let series: Vec<(&str, Vec<Option<f64>>)> = numeric_columns
            .iter()
            .filter_map(|name| dataset.column(name))
            .map(|column| {
                let values = column.cells().iter().map(CellValue::as_f64).collect();
                (column.name(), values)
            })
            .collect();

        if series.len() < 2 {
            return CorrelationReport::default();
        }

        let k = series.len();
        let mut grid = vec![vec![None; k]; k];
        for i in 0..k {
            grid[i][i] = has_variance(&series[i].1).then_some(1.0);
            for j in (i + 1)..k {
                let r = pearson(&series[i].1, &series[j].1);
                grid[i][j] = r;
                grid[j][i] = r;
            }
        }

        let mut strong_correlations = Vec::new();
        for i in 0..k {
            for j in (i + 1)..k {
                let Some(r) = grid[i][j] else { continue };
                if r.abs() >= self.config.correlation_threshold {
                    strong_correlations.push(StrongCorrelation {
                        column1: series[i].0.to_string(),
                        column2: series[j].0.to_string(),
                        correlation: r,
                        strength: if r > 0.0 {
                            CorrelationStrength::Positive
                        } else {
                            CorrelationStrength::Negative
                        },
                    });
                }
            }
        }
        // Stable, so equal magnitudes keep row-major pair order.
        strong_correlations.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));

        let matrix: CorrelationMatrix = series
            .iter()
            .zip(&grid)
            .map(|((name, _), row)| {
                let entries: IndexMap<String, Option<f64>> = series
                    .iter()
                    .zip(row)
                    .map(|((other, _), r)| (other.to_string(), *r))
                    .collect();
                (name.to_string(), entries)
            })
            .collect();

        CorrelationReport {
            matrix,
            strong_correlations,
        }
    }
}

fn has_variance(values: &[Option<f64>]) -> bool {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.len() < 2 {
        return false;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let ss: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
    ss > 0.0 && ss.is_finite()
}

/// Pearson's r over pairwise complete observations, clamped to [-1, 1].
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
