//! Descriptive statistics and outlier detection for numeric columns.

use super::errors::{ColumnError, ColumnResult};
use super::percentage;
use super::profile_types::NumericStats;
use crate::config::{OutlierMethod, ProfilerConfig};
use crate::dataset::Column;

/// Relative resolution below which a variance counts as zero.
const VARIANCE_RESOLUTION: f64 = 1e-15;

/// Computes [`NumericStats`] for one column.
pub struct NumericStatistician<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> NumericStatistician<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profiles a numeric column.
    ///
    /// Missing values are dropped before any statistic is computed; a column
    /// without values yields [`ColumnError::NoNonNullValues`].
    pub fn profile(&self, column: &Column) -> ColumnResult<NumericStats> {
        let mut values = column.numeric_values();
        if values.is_empty() {
            return Err(ColumnError::NoNonNullValues);
        }

        let rows = column.len();
        let missing = rows - values.len();
        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;
        if mean.is_nan() {
            return Err(ColumnError::computation("mean is undefined"));
        }

        values.sort_by(f64::total_cmp);
        let q25 = quantile(&values, 0.25);
        let q75 = quantile(&values, 0.75);
        let (skewness, kurtosis) = shape(&values, mean);
        let (outlier_count, outlier_pct) = match self.config.outlier_method {
            OutlierMethod::Iqr => {
                let count = iqr_outliers(&values, q25, q75, self.config.outlier_multiplier);
                (count, percentage(count, values.len()))
            }
        };

        Ok(NumericStats {
            count: values.len(),
            missing,
            missing_pct: percentage(missing, rows),
            mean,
            median: quantile(&values, 0.5),
            std: sample_std(&values, mean),
            min: values[0],
            max: values[values.len() - 1],
            q25,
            q75,
            skewness,
            kurtosis,
            outlier_count,
            outlier_pct,
        })
    }
}

/// Linear interpolation between closest ranks over sorted, non-empty values.
///
/// When either neighbour is infinite the nearer rank is returned instead.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        return a;
    }
    let t = position - lo as f64;
    if a.is_infinite() || b.is_infinite() {
        return if t < 0.5 { a } else { b };
    }
    (a + (b - a) * t).clamp(a, b)
}

fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let std = (ss / (values.len() - 1) as f64).sqrt();
    (!std.is_nan()).then_some(std)
}

/// Biased skewness and excess kurtosis from central moments.
///
/// Both are `None` when the variance is zero relative to the mean.
fn shape(values: &[f64], mean: f64) -> (Option<f64>, Option<f64>) {
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    if !m2.is_finite() || m2 == 0.0 || m2 <= (VARIANCE_RESOLUTION * mean).powi(2) {
        return (None, None);
    }

    let skewness = m3 / m2.powf(1.5);
    let kurtosis = m4 / (m2 * m2) - 3.0;
    (
        skewness.is_finite().then_some(skewness),
        kurtosis.is_finite().then_some(kurtosis),
    )
}

/// Values strictly outside the Tukey fences.
fn iqr_outliers(values: &[f64], q1: f64, q3: f64, multiplier: f64) -> usize {
    // Equal infinite quartiles give a NaN spread; the fences collapse onto them.
    let spread = multiplier * (q3 - q1);
    let spread = if spread.is_nan() { 0.0 } else { spread };
    let lower = q1 - spread;
    let upper = q3 + spread;
    values.iter().filter(|&&v| v < lower || v > upper).count()
}
