//! Profiles a synthetic movie catalogue.
//!
//! The catalogue has mixed date formats, missing budgets and directors,
//! zero-revenue flops and correlated money columns, which exercises every
//! profiling stage.
//!
//! Run with:
//! ```bash
//! cargo run --example synthetic_movies -- [rows] [seed]
//! ```
//!
//! Set `INSIGHT_LOG_JSON=1` for JSON log lines on stderr.

use insight_profiler::formatters::{FormatterConfig, MarkdownFormatter, ProfileFormatter};
use insight_profiler::logging::setup::{init_logging, LoggingConfig};
use insight_profiler::prelude::*;
use insight_profiler::test_fixtures::generate_movie_batch;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let json_logs = std::env::var_os("INSIGHT_LOG_JSON").is_some();
    init_logging(LoggingConfig::default().with_json_format(json_logs))?;

    let mut args = std::env::args().skip(1);
    let rows: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1_000);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);

    let batch = generate_movie_batch(rows, seed);
    let result = Profiler::builder()
        .log_config(LogConfig::production())
        .build()?
        .profile_batch(&batch)?;

    println!("{}", result.to_summary_json()?);
    println!();
    print!(
        "{}",
        MarkdownFormatter::with_config(FormatterConfig::detailed()).format(&result)?
    );

    Ok(())
}
