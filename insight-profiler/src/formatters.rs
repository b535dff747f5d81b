//! Report formatting for profile results.
//!
//! This module renders a [`ProfileResult`] as JSON for programmatic
//! consumers, as a human-readable console report, or as Markdown for
//! documentation.
//!
//! # Examples
//!
//! ```rust
//! use insight_profiler::formatters::{FormatterConfig, HumanFormatter, ProfileFormatter};
//! # use std::sync::Arc;
//! # use arrow::array::Float64Array;
//! # use arrow::datatypes::{DataType, Field, Schema};
//! # use arrow::record_batch::RecordBatch;
//! # use insight_profiler::analyzers::Profiler;
//! # fn main() -> insight_profiler::error::Result<()> {
//! # let schema = Arc::new(Schema::new(vec![Field::new("score", DataType::Float64, false)]));
//! # let batch = RecordBatch::try_new(schema, vec![Arc::new(Float64Array::from(vec![1.0, 1.0, 2.0]))])?;
//! # let result = Profiler::builder().build()?.profile_batch(&batch)?;
//! let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
//! let report = formatter.format(&result)?;
//! assert!(report.contains("Dataset Profile"));
//! # Ok(())
//! # }
//! ```

use std::fmt::Write;

use serde_json::Value;

use crate::analyzers::{ColumnClass, ProfileResult, Profiled};
use crate::error::Result;

/// Configuration options for formatting profile results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the dataset overview and column classification
    pub include_overview: bool,
    /// Include per-column statistics
    pub include_column_stats: bool,
    /// Include strong correlations
    pub include_correlations: bool,
    /// Include the full correlation matrix (JSON and Markdown only)
    pub include_correlation_matrix: bool,
    /// Include data quality findings
    pub include_quality: bool,
    /// Maximum number of top categories shown per categorical column
    pub max_top_categories: usize,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_overview: true,
            include_column_stats: true,
            include_correlations: true,
            include_correlation_matrix: false,
            include_quality: true,
            max_top_categories: 5,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the overview and
    /// quality findings.
    pub fn minimal() -> Self {
        Self {
            include_overview: true,
            include_column_stats: false,
            include_correlations: false,
            include_correlation_matrix: false,
            include_quality: true,
            max_top_categories: 0,
            use_colors: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_correlation_matrix: true,
            max_top_categories: 10,
            ..Self::default()
        }
    }

    /// Creates a configuration suitable for CI logs.
    pub fn ci() -> Self {
        Self {
            max_top_categories: 3,
            use_colors: false,
            ..Self::default()
        }
    }

    pub fn with_column_stats(mut self, include: bool) -> Self {
        self.include_column_stats = include;
        self
    }

    pub fn with_correlation_matrix(mut self, include: bool) -> Self {
        self.include_correlation_matrix = include;
        self
    }

    /// Sets the maximum number of top categories shown per column.
    pub fn with_max_top_categories(mut self, max: usize) -> Self {
        self.max_top_categories = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Trait for formatting profile results into different output formats.
///
/// # Examples
///
/// ```rust
/// use insight_profiler::analyzers::ProfileResult;
/// use insight_profiler::formatters::ProfileFormatter;
///
/// struct RowCount;
///
/// impl ProfileFormatter for RowCount {
///     fn format(&self, result: &ProfileResult) -> insight_profiler::error::Result<String> {
///         Ok(format!("{} rows", result.overview.rows))
///     }
/// }
/// ```
pub trait ProfileFormatter {
    /// Formats a profile result into a string representation.
    fn format(&self, result: &ProfileResult) -> Result<String>;

    /// Formats a profile result with custom configuration.
    fn format_with_config(
        &self,
        result: &ProfileResult,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(result)
    }
}

/// Formats profile results as JSON.
///
/// By default the complete result is emitted, filtered by the
/// [`FormatterConfig`]. With [`JsonFormatter::summary_only`] the compact
/// [`ProfileSummary`](crate::summary::ProfileSummary) is emitted instead.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
    summary_only: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default())
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
            summary_only: false,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Emits the compact summary view instead of the full result.
    pub fn summary_only(mut self) -> Self {
        self.summary_only = true;
        self
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for JsonFormatter {
    fn format(&self, result: &ProfileResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(&self, result: &ProfileResult, config: &FormatterConfig) -> Result<String> {
        if self.summary_only {
            return self.render(&serde_json::to_value(result.summary())?);
        }

        let mut value = serde_json::to_value(result)?;
        filter_json(&mut value, config);
        self.render(&value)
    }
}

/// Drops the sections `config` excludes from a serialized result.
fn filter_json(value: &mut Value, config: &FormatterConfig) {
    let Some(object) = value.as_object_mut() else {
        return;
    };

    if !config.include_overview {
        object.remove("overview");
        object.remove("columns");
    }
    if !config.include_column_stats {
        object.remove("numeric_stats");
        object.remove("categorical_stats");
        object.remove("datetime_stats");
    } else if let Some(categorical) = object
        .get_mut("categorical_stats")
        .and_then(Value::as_object_mut)
    {
        for stats in categorical.values_mut() {
            if let Some(Value::Array(top)) = stats.get_mut("top_categories") {
                top.truncate(config.max_top_categories);
            }
        }
    }
    if !config.include_correlations {
        object.remove("correlations");
    } else if !config.include_correlation_matrix {
        if let Some(correlations) = object.get_mut("correlations").and_then(Value::as_object_mut) {
            correlations.remove("matrix");
        }
    }
    if !config.include_quality {
        object.remove("data_quality");
    }
}

const GREEN: &str = "32";
const YELLOW: &str = "33";
const BOLD: &str = "1";

fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Formats profile results as a console report.
///
/// Quality findings use the same wording as the interactive profiling
/// page: a warning line per finding, a success line when a check is clean.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for HumanFormatter {
    fn format(&self, result: &ProfileResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(&self, result: &ProfileResult, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let colors = config.use_colors;
        let warn = |text: String| paint(&format!("⚠️  {text}"), YELLOW, colors);
        let ok = |text: &str| paint(&format!("✅ {text}"), GREEN, colors);

        writeln!(output)?;
        writeln!(output, "📊 {}", paint("Dataset Profile", BOLD, colors))?;

        if config.include_overview {
            let overview = &result.overview;
            writeln!(output, "   Rows: {}", overview.rows)?;
            writeln!(output, "   Columns: {}", overview.columns)?;
            writeln!(output, "   Memory Usage: {:.2} MB", overview.memory_usage_mb)?;

            writeln!(output)?;
            writeln!(output, "🧭 Column Classification:")?;
            for (class, columns) in result.columns.iter() {
                if !columns.is_empty() {
                    writeln!(
                        output,
                        "   {class} ({}): {}",
                        columns.len(),
                        columns.join(", ")
                    )?;
                }
            }
        }

        if config.include_column_stats {
            if !result.numeric_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "📈 Numeric Columns:")?;
                for (column, profiled) in &result.numeric_stats {
                    match profiled {
                        Profiled::Stats(stats) => {
                            writeln!(
                                output,
                                "   {column}: mean {:.2}, median {:.2}, std {}, range [{:.2}, {:.2}]",
                                stats.mean,
                                stats.median,
                                optional(stats.std),
                                stats.min,
                                stats.max
                            )?;
                            if stats.outlier_count > 0 {
                                writeln!(
                                    output,
                                    "      {}",
                                    warn(format!(
                                        "{} outliers ({:.1}%)",
                                        stats.outlier_count, stats.outlier_pct
                                    ))
                                )?;
                            }
                        }
                        Profiled::Unavailable { error } => {
                            writeln!(output, "   {column}: {}", warn(error.clone()))?;
                        }
                    }
                }
            }

            if !result.categorical_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "🏷️  Categorical Columns:")?;
                for (column, stats) in &result.categorical_stats {
                    writeln!(
                        output,
                        "   {column}: {} unique, {:.1}% missing, entropy {:.3}",
                        stats.unique_count, stats.missing_pct, stats.entropy
                    )?;
                    for category in stats.top_categories.iter().take(config.max_top_categories) {
                        writeln!(
                            output,
                            "      {}: {} ({:.1}%)",
                            category.value, category.count, category.percentage
                        )?;
                    }
                }
            }

            if !result.datetime_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "📅 Datetime Columns:")?;
                for (column, profiled) in &result.datetime_stats {
                    match profiled {
                        Profiled::Stats(stats) => {
                            writeln!(
                                output,
                                "   {column}: {} to {} ({} days), frequency {}",
                                stats.min_date,
                                stats.max_date,
                                stats.range_days,
                                stats.inferred_frequency.as_deref().unwrap_or("n/a")
                            )?;
                        }
                        Profiled::Unavailable { error } => {
                            writeln!(output, "   {column}: {}", warn(error.clone()))?;
                        }
                    }
                }
            }
        }

        if config.include_correlations {
            writeln!(output)?;
            writeln!(output, "🔗 Strong Correlations:")?;
            let strong = &result.correlations.strong_correlations;
            if strong.is_empty() {
                writeln!(output, "   No strong correlations found")?;
            }
            for pair in strong {
                writeln!(
                    output,
                    "   {} ↔ {}: {:.3} ({})",
                    pair.column1, pair.column2, pair.correlation, pair.strength
                )?;
            }
        }

        if config.include_quality {
            let quality = &result.data_quality;
            writeln!(output)?;
            writeln!(output, "🔍 Data Quality:")?;

            if quality.duplicate_rows > 0 {
                writeln!(
                    output,
                    "   {}",
                    warn(format!(
                        "Found {} duplicate rows ({:.1}%)",
                        quality.duplicate_rows, quality.duplicate_rows_pct
                    ))
                )?;
            } else {
                writeln!(output, "   {}", ok("No duplicate rows found"))?;
            }

            if quality.constant_columns.is_empty() {
                writeln!(output, "   {}", ok("No constant columns found"))?;
            } else {
                writeln!(
                    output,
                    "   {}",
                    warn(format!(
                        "Found {} constant columns: {}",
                        quality.constant_columns.len(),
                        quality.constant_columns.join(", ")
                    ))
                )?;
            }

            if quality.high_missing_columns.is_empty() {
                writeln!(output, "   {}", ok("No columns with excessive missing values"))?;
            } else {
                let listed: Vec<String> = quality
                    .high_missing_columns
                    .iter()
                    .map(|c| format!("{} ({:.1}%)", c.column, c.missing_pct))
                    .collect();
                writeln!(
                    output,
                    "   {}",
                    warn(format!(
                        "Found {} columns with high missing values: {}",
                        listed.len(),
                        listed.join(", ")
                    ))
                )?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}

/// Formats profile results as Markdown.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default())
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for MarkdownFormatter {
    fn format(&self, result: &ProfileResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(&self, result: &ProfileResult, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Dataset Profile")?;

        if config.include_overview {
            let overview = &result.overview;
            writeln!(output)?;
            writeln!(output, "| Metric | Value |")?;
            writeln!(output, "|--------|-------|")?;
            writeln!(output, "| Rows | {} |", overview.rows)?;
            writeln!(output, "| Columns | {} |", overview.columns)?;
            writeln!(output, "| Memory Usage | {:.2} MB |", overview.memory_usage_mb)?;

            writeln!(output)?;
            writeln!(output, "{h}# Column Classification")?;
            writeln!(output)?;
            writeln!(output, "| Type | Count | Columns |")?;
            writeln!(output, "|------|-------|---------|")?;
            for class in ColumnClass::ALL {
                let columns = result.columns.columns(class);
                writeln!(output, "| {class} | {} | {} |", columns.len(), columns.join(", "))?;
            }
        }

        if config.include_column_stats {
            if !result.numeric_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "{h}# Numeric Columns")?;
                writeln!(output)?;
                writeln!(output, "| Column | Mean | Median | Std | Min | Max | Outliers |")?;
                writeln!(output, "|--------|------|--------|-----|-----|-----|----------|")?;
                for (column, profiled) in &result.numeric_stats {
                    match profiled {
                        Profiled::Stats(s) => writeln!(
                            output,
                            "| {column} | {:.2} | {:.2} | {} | {:.2} | {:.2} | {} ({:.1}%) |",
                            s.mean,
                            s.median,
                            optional(s.std),
                            s.min,
                            s.max,
                            s.outlier_count,
                            s.outlier_pct
                        )?,
                        Profiled::Unavailable { error } => {
                            writeln!(output, "| {column} | _{error}_ | | | | | |")?
                        }
                    }
                }
            }

            if !result.categorical_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "{h}# Categorical Columns")?;
                writeln!(output)?;
                writeln!(output, "| Column | Unique | Missing % | Top Values |")?;
                writeln!(output, "|--------|--------|-----------|------------|")?;
                for (column, stats) in &result.categorical_stats {
                    let top: Vec<String> = stats
                        .top_categories
                        .iter()
                        .take(config.max_top_categories)
                        .map(|c| format!("{} ({:.1}%)", c.value, c.percentage))
                        .collect();
                    writeln!(
                        output,
                        "| {column} | {} | {:.1}% | {} |",
                        stats.unique_count,
                        stats.missing_pct,
                        top.join(", ")
                    )?;
                }
            }

            if !result.datetime_stats.is_empty() {
                writeln!(output)?;
                writeln!(output, "{h}# Datetime Columns")?;
                writeln!(output)?;
                writeln!(output, "| Column | Min | Max | Range (days) | Frequency |")?;
                writeln!(output, "|--------|-----|-----|--------------|-----------|")?;
                for (column, profiled) in &result.datetime_stats {
                    match profiled {
                        Profiled::Stats(s) => writeln!(
                            output,
                            "| {column} | {} | {} | {} | {} |",
                            s.min_date,
                            s.max_date,
                            s.range_days,
                            s.inferred_frequency.as_deref().unwrap_or("n/a")
                        )?,
                        Profiled::Unavailable { error } => {
                            writeln!(output, "| {column} | _{error}_ | | | |")?
                        }
                    }
                }
            }
        }

        if config.include_correlations {
            writeln!(output)?;
            writeln!(output, "{h}# Strong Correlations")?;
            writeln!(output)?;
            let strong = &result.correlations.strong_correlations;
            if strong.is_empty() {
                writeln!(output, "_No strong correlations found._")?;
            } else {
                writeln!(output, "| Column 1 | Column 2 | Correlation | Type |")?;
                writeln!(output, "|----------|----------|-------------|------|")?;
                for pair in strong {
                    writeln!(
                        output,
                        "| {} | {} | {:.3} | {} |",
                        pair.column1, pair.column2, pair.correlation, pair.strength
                    )?;
                }
            }

            let matrix = &result.correlations.matrix;
            if config.include_correlation_matrix && !matrix.is_empty() {
                writeln!(output)?;
                writeln!(output, "{h}## Correlation Matrix")?;
                writeln!(output)?;
                let names: Vec<&str> = matrix.keys().map(String::as_str).collect();
                writeln!(output, "| | {} |", names.join(" | "))?;
                writeln!(output, "|---|{}", "---|".repeat(names.len()))?;
                for (row, cells) in matrix {
                    let rendered: Vec<String> = cells.values().map(|r| optional(*r)).collect();
                    writeln!(output, "| **{row}** | {} |", rendered.join(" | "))?;
                }
            }
        }

        if config.include_quality {
            let quality = &result.data_quality;
            writeln!(output)?;
            writeln!(output, "{h}# Data Quality")?;
            writeln!(output)?;
            writeln!(
                output,
                "- **Duplicate rows:** {} ({:.1}%)",
                quality.duplicate_rows, quality.duplicate_rows_pct
            )?;
            if quality.constant_columns.is_empty() {
                writeln!(output, "- **Constant columns:** none")?;
            } else {
                writeln!(
                    output,
                    "- **Constant columns:** {}",
                    quality.constant_columns.join(", ")
                )?;
            }
            if quality.high_missing_columns.is_empty() {
                writeln!(output, "- **High missing columns:** none")?;
            } else {
                for column in &quality.high_missing_columns {
                    writeln!(
                        output,
                        "- **High missing:** {} ({:.1}%)",
                        column.column, column.missing_pct
                    )?;
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{profile_of, sample_orders_batch};

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert!(config.include_overview);
        assert!(config.include_quality);
        assert!(config.use_colors);
        assert!(!config.include_correlation_matrix);

        let minimal = FormatterConfig::minimal();
        assert!(!minimal.include_column_stats);
        assert!(!minimal.use_colors);

        let ci = FormatterConfig::ci();
        assert!(!ci.use_colors);
        assert_eq!(ci.max_top_categories, 3);

        assert!(FormatterConfig::detailed().include_correlation_matrix);
    }

    #[test]
    fn test_json_formatter_filters_sections() {
        let result = profile_of(&sample_orders_batch());

        let full: Value = serde_json::from_str(&JsonFormatter::new().format(&result).unwrap()).unwrap();
        assert!(full.get("numeric_stats").is_some());
        assert!(full["correlations"].get("matrix").is_none());
        assert!(full["correlations"].get("strong_correlations").is_some());

        let config = FormatterConfig::minimal();
        let minimal: Value = serde_json::from_str(
            &JsonFormatter::new()
                .with_pretty(false)
                .format_with_config(&result, &config)
                .unwrap(),
        )
        .unwrap();
        assert!(minimal.get("numeric_stats").is_none());
        assert!(minimal.get("correlations").is_none());
        assert!(minimal.get("data_quality").is_some());
    }

    #[test]
    fn test_json_formatter_truncates_top_categories() {
        let result = profile_of(&sample_orders_batch());
        let config = FormatterConfig::default().with_max_top_categories(1);
        let json: Value =
            serde_json::from_str(&JsonFormatter::with_config(config).format(&result).unwrap()).unwrap();
        let top = json["categorical_stats"]["status"]["top_categories"]
            .as_array()
            .unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0]["value"], "shipped");
    }

    #[test]
    fn test_json_formatter_summary_only() {
        let result = profile_of(&sample_orders_batch());
        let json: Value =
            serde_json::from_str(&JsonFormatter::new().summary_only().format(&result).unwrap())
                .unwrap();
        assert!(json.get("sample_statistics").is_some());
        assert!(json.get("numeric_stats").is_none());
    }

    #[test]
    fn test_human_formatter() {
        let result = profile_of(&sample_orders_batch());
        let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
        let output = formatter.format(&result).unwrap();

        assert!(output.contains("Rows: 10"));
        assert!(output.contains("numeric (2): amount, quantity"));
        assert!(output.contains("amount ↔ quantity"));
        assert!(output.contains("✅ No duplicate rows found"));
        assert!(output.contains("Found 2 constant columns: region, notes"));
        assert!(output.contains("notes (100.0%)"));
        assert!(!output.contains("\x1b["));

        let colored = HumanFormatter::new().format(&result).unwrap();
        assert!(colored.contains("\x1b[33m"));
    }

    #[test]
    fn test_markdown_formatter() {
        let result = profile_of(&sample_orders_batch());
        let output = MarkdownFormatter::new().format(&result).unwrap();
        assert!(output.starts_with("## Dataset Profile"));
        assert!(output.contains("| Rows | 10 |"));
        assert!(output.contains("### Numeric Columns"));
        assert!(output.contains("| id | 1 | order_id |"));
        assert!(!output.contains("Correlation Matrix"));

        let output = MarkdownFormatter::with_config(FormatterConfig::detailed())
            .with_heading_level(1)
            .format(&result)
            .unwrap();
        assert!(output.starts_with("# Dataset Profile"));
        assert!(output.contains("### Correlation Matrix"));
    }
}
