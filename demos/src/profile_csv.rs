//! Profiles a CSV file and prints the console report and display tables.
//!
//! DataFusion reads the file and infers the schema; the profiler works on
//! the collected record batches.
//!
//! Run with:
//! ```bash
//! cargo run --example profile_csv -- data.csv [config.yaml]
//! ```
//!
//! Without arguments a small built-in sales table is profiled.

use datafusion::prelude::*;
use insight_profiler::logging::setup::{init_logging, LoggingConfig};
use insight_profiler::prelude::*;

const SAMPLE_CSV: &str = r#"sale_id,region,product,units,unit_price,sold_on,returned
1,North,Widget,3,9.99,2024-01-02,false
2,South,Widget,1,9.99,2024-01-02,false
3,North,Gadget,2,24.50,2024-01-03,false
4,East,Widget,5,9.99,2024-01-04,true
5,North,Gizmo,1,149.00,2024-01-05,false
6,South,Gadget,2,24.50,2024-01-06,false
7,East,Widget,4,9.99,2024-01-07,false
8,North,Widget,3,9.99,,false
9,South,Gizmo,1,149.00,2024-01-09,false
10,North,Gadget,60,24.50,2024-01-10,true"#;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            let path = std::env::temp_dir().join("insight_sales.csv");
            std::fs::write(&path, SAMPLE_CSV)?;
            path.to_string_lossy().into_owned()
        }
    };
    let config = match args.next() {
        Some(config_path) => ProfilerConfig::from_yaml_file(config_path)?,
        None => ProfilerConfig::default(),
    };

    let ctx = SessionContext::new();
    let df = ctx.read_csv(path.as_str(), CsvReadOptions::default()).await?;
    let schema = df.schema().inner().clone();
    let batches = df.collect().await?;
    let dataset = match Dataset::try_from_batches(&schema, &batches) {
        Ok(dataset) => dataset,
        Err(err) => return Err(report_input_error(&path, err)),
    };

    tracing::info!(path = %path, rows = dataset.num_rows(), "Loaded CSV");

    let profiler = Profiler::builder()
        .config(config)
        .log_config(LogConfig::verbose())
        .progress_callback(|progress| {
            println!(
                "[{}/{}] {}",
                progress.current_stage, progress.total_stages, progress.message
            );
        })
        .build()?;
    let result = match profiler.profile(&dataset) {
        Ok(result) => result,
        Err(err) => return Err(report_input_error(&path, err)),
    };

    print!("{}", HumanFormatter::new().format(&result)?);
    println!("{}", result.to_tables()?.render()?);

    Ok(())
}

/// Explains input-shape failures before handing the error back to `main`.
fn report_input_error(path: &str, err: ProfileError) -> Box<dyn std::error::Error> {
    if err.is_fatal_input() {
        eprintln!("{path} cannot be profiled: {err}");
        eprintln!("The file needs at least one row, one column and unique column names.");
    }
    err.into()
}
