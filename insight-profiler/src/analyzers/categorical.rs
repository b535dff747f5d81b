//! Frequency statistics for categorical columns.

use indexmap::IndexMap;

use super::percentage;
use super::profile_types::{CategoricalStats, CategoryFrequency};
use crate::config::ProfilerConfig;
use crate::dataset::{CellKey, CellValue, Column};

/// Computes [`CategoricalStats`] for one column.
///
/// Values are ranked by descending frequency. Values with equal frequency
/// keep the order in which they first appear in the column.
pub struct CategoricalStatistician<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> CategoricalStatistician<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profiles a categorical column. Cannot fail: an empty column simply
    /// has no categories and zero entropy.
    pub fn profile(&self, column: &Column) -> CategoricalStats {
        let rows = column.len();
        let frequencies = value_counts(column);
        let count: usize = frequencies.values().map(|(_, c)| c).sum();
        let missing = rows - count;

        let mut ranked: Vec<(&CellValue, usize)> = frequencies.values().copied().collect();
        // Stable, so ties stay in first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let top_categories = ranked
            .iter()
            .take(self.config.top_categories_count)
            .map(|(value, freq)| CategoryFrequency {
                value: value.to_string(),
                count: *freq,
                percentage: percentage(*freq, count),
            })
            .collect();

        CategoricalStats {
            count,
            missing,
            missing_pct: percentage(missing, rows),
            unique_count: frequencies.len(),
            top_categories,
            entropy: entropy(ranked.iter().map(|(_, c)| *c), count),
        }
    }
}

/// Occurrences of each distinct non-missing value, in first-seen order.
fn value_counts(column: &Column) -> IndexMap<CellKey<'_>, (&CellValue, usize)> {
    let mut counts: IndexMap<CellKey<'_>, (&CellValue, usize)> = IndexMap::new();
    for cell in column.present() {
        counts.entry(cell.key()).or_insert((cell, 0)).1 += 1;
    }
    counts
}

/// Shannon entropy in nats of a frequency distribution.
pub(crate) fn entropy(counts: impl Iterator<Item = usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let h: f64 = counts
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum();
    // A single category yields -0.0.
    if h > 0.0 {
        h
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StorageType;

    fn column(values: &[Option<&str>]) -> Column {
        let cells = values
            .iter()
            .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.to_string())))
            .collect();
        Column::new("c", StorageType::Text, cells)
    }

    fn profile(values: &[Option<&str>]) -> CategoricalStats {
        let config = ProfilerConfig::default();
        CategoricalStatistician::new(&config).profile(&column(values))
    }

    #[test]
    fn test_top_categories() {
        let stats = profile(&[Some("A"), Some("A"), Some("B")]);
        assert_eq!(stats.unique_count, 2);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.top_categories.len(), 2);
        assert_eq!(stats.top_categories[0].value, "A");
        assert_eq!(stats.top_categories[0].count, 2);
        assert!((stats.top_categories[0].percentage - 66.666_666).abs() < 1e-3);
        assert_eq!(stats.top_categories[1].value, "B");
        assert!((stats.top_categories[1].percentage - 33.333_333).abs() < 1e-3);
    }

    #[test]
    fn test_percentages_ignore_missing() {
        let stats = profile(&[Some("A"), None, None, Some("B")]);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.missing_pct, 50.0);
        assert_eq!(stats.top_categories[0].percentage, 50.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let stats = profile(&[Some("z"), Some("y"), Some("x"), Some("y"), Some("z"), Some("x")]);
        let order: Vec<_> = stats.top_categories.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(order, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_top_n_limit_but_entropy_over_all_values() {
        let config = ProfilerConfig {
            top_categories_count: 1,
            ..Default::default()
        };
        let values = column(&[Some("a"), Some("b"), Some("c"), Some("d")]);
        let stats = CategoricalStatistician::new(&config).profile(&values);
        assert_eq!(stats.top_categories.len(), 1);
        assert_eq!(stats.unique_count, 4);
        assert!((stats.entropy - 4.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_column() {
        let stats = profile(&[None, None]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.unique_count, 0);
        assert!(stats.top_categories.is_empty());
        assert_eq!(stats.entropy, 0.0);
        assert_eq!(stats.missing_pct, 100.0);
    }

    #[test]
    fn test_single_category_has_zero_entropy() {
        let stats = profile(&[Some("x"), Some("x"), Some("x")]);
        assert_eq!(stats.entropy, 0.0);
        assert!(stats.entropy.is_sign_positive());
    }
}
