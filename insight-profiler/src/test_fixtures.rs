//! Test fixtures for profiling scenarios.
//!
//! Small hand-built record batches with known statistics, plus a seeded
//! generator for a synthetic movie catalogue with mixed date formats,
//! missing values and correlated money columns. Available to unit tests
//! and, with the `test-utils` feature, to integration tests, benches and
//! demos.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::analyzers::{ProfileResult, Profiler};
use crate::dataset::Dataset;

/// Profiles a batch with the default configuration.
///
/// # Panics
///
/// Panics if the batch cannot be profiled.
pub fn profile_of(batch: &RecordBatch) -> ProfileResult {
    let dataset = Dataset::try_from_batch(batch).expect("fixture batch materializes");
    Profiler::builder()
        .build()
        .expect("default configuration is valid")
        .profile(&dataset)
        .expect("fixture batch profiles")
}

/// Ten orders covering every column class.
///
/// | column       | class       | notes                                   |
/// |--------------|-------------|-----------------------------------------|
/// | `order_id`   | id          | name pattern                            |
/// | `amount`     | numeric     | one missing value, 250.0 is an outlier  |
/// | `quantity`   | numeric     | tracks `amount`                         |
/// | `status`     | categorical | `shipped` x6, `pending` x2, `returned`  |
/// | `order_date` | datetime    | daily, one repeated day, one missing    |
/// | `is_gift`    | boolean     |                                         |
/// | `region`     | categorical | constant                                |
/// | `notes`      | categorical | all missing                             |
pub fn sample_orders_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("amount", DataType::Float64, true),
        Field::new("quantity", DataType::Int64, true),
        Field::new("status", DataType::Utf8, true),
        Field::new("order_date", DataType::Utf8, true),
        Field::new("is_gift", DataType::Boolean, true),
        Field::new("region", DataType::Utf8, true),
        Field::new("notes", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from((1..=10).collect::<Vec<i64>>())),
        Arc::new(Float64Array::from(vec![
            Some(10.0),
            Some(12.5),
            Some(12.5),
            Some(9.0),
            Some(11.0),
            Some(250.0),
            Some(10.0),
            Some(12.5),
            None,
            Some(11.0),
        ])),
        Arc::new(Int64Array::from(vec![1, 2, 2, 1, 1, 20, 1, 2, 1, 1])),
        Arc::new(StringArray::from(vec![
            Some("shipped"),
            Some("shipped"),
            Some("pending"),
            Some("shipped"),
            Some("returned"),
            Some("shipped"),
            Some("pending"),
            Some("shipped"),
            Some("shipped"),
            None,
        ])),
        Arc::new(StringArray::from(vec![
            Some("2024-01-01"),
            Some("2024-01-01"),
            Some("2024-01-02"),
            Some("2024-01-03"),
            Some("2024-01-04"),
            Some("2024-01-05"),
            Some("2024-01-06"),
            Some("2024-01-07"),
            Some("2024-01-08"),
            None,
        ])),
        Arc::new(BooleanArray::from(vec![
            true, false, false, false, true, false, false, false, false, false,
        ])),
        Arc::new(StringArray::from(vec!["EU"; 10])),
        Arc::new(StringArray::from(vec![None::<&str>; 10])),
    ];

    RecordBatch::try_new(schema, columns).expect("valid orders batch")
}

/// `rows` rows where the last `duplicates` rows repeat earlier ones.
pub fn duplicated_rows_batch(rows: usize, duplicates: usize) -> RecordBatch {
    let distinct = rows - duplicates;
    let keys: Vec<i64> = (0..rows).map(|i| (i % distinct) as i64 % 7).collect();
    let labels: Vec<String> = (0..rows).map(|i| format!("row-{}", i % distinct)).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("bucket", DataType::Int64, false),
        Field::new("label", DataType::Utf8, false),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(keys)),
            Arc::new(StringArray::from(labels)),
        ],
    )
    .expect("valid duplicates batch")
}

const GENRES: [&str; 8] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Documentary",
];

const DIRECTORS: [&str; 7] = [
    "Christopher Nolan",
    "Steven Spielberg",
    "Martin Scorsese",
    "Quentin Tarantino",
    "Greta Gerwig",
    "James Cameron",
    "Unknown Director",
];

const STUDIOS: [&str; 6] = [
    "Warner Bros",
    "Universal",
    "Paramount",
    "Disney",
    "Sony",
    "Indie",
];

/// Generates a synthetic movie catalogue.
///
/// Deterministic for a given `seed`. Release dates mix `DD-MM-YYYY` (every
/// tenth row), `YYYY/MM/DD` (every fifteenth) and ISO dates; 5% of budgets
/// and 2% of directors are missing; 10% of movies are flops with zero
/// revenue.
pub fn generate_movie_batch(rows: usize, seed: u64) -> RecordBatch {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();

    let mut ids = Vec::with_capacity(rows);
    let mut titles = Vec::with_capacity(rows);
    let mut genres = Vec::with_capacity(rows);
    let mut release_dates = Vec::with_capacity(rows);
    let mut budgets: Vec<Option<f64>> = Vec::with_capacity(rows);
    let mut revenues = Vec::with_capacity(rows);
    let mut directors: Vec<Option<String>> = Vec::with_capacity(rows);
    let mut studios = Vec::with_capacity(rows);
    let mut runtimes = Vec::with_capacity(rows);
    let mut ratings = Vec::with_capacity(rows);
    let mut votes = Vec::with_capacity(rows);

    for i in 0..rows {
        let date = start + Duration::days(rng.random_range(0..=365 * 24));
        let date = if i % 10 == 0 {
            date.format("%d-%m-%Y").to_string()
        } else if i % 15 == 0 {
            date.format("%Y/%m/%d").to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        };

        let budget = rng.random_range(1..=300i64) * 1_000_000;
        let revenue = if rng.random::<f64>() > 0.1 {
            (budget as f64 * rng.random_range(0.5..5.0)) as i64
        } else {
            0
        };

        ids.push(format!("MV-{i:05}"));
        titles.push(format!("Movie Title {i}"));
        genres.push(GENRES[rng.random_range(0..GENRES.len())]);
        release_dates.push(date);
        budgets.push(Some(budget as f64));
        revenues.push(revenue);
        directors.push(Some(
            DIRECTORS[rng.random_range(0..DIRECTORS.len())].to_string(),
        ));
        studios.push(STUDIOS[rng.random_range(0..STUDIOS.len())]);
        runtimes.push(rng.random_range(80..=180i64));
        ratings.push((rng.random_range(1.0..10.0f64) * 10.0).round() / 10.0);
        votes.push(rng.random_range(100..=100_000i64));
    }

    blank_random_rows(&mut budgets, 0.05, &mut rng);
    blank_random_rows(&mut directors, 0.02, &mut rng);

    let schema = Arc::new(Schema::new(vec![
        Field::new("Movie_ID", DataType::Utf8, false),
        Field::new("Title", DataType::Utf8, false),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Release_Date", DataType::Utf8, false),
        Field::new("Budget_USD", DataType::Float64, true),
        Field::new("Revenue_USD", DataType::Int64, false),
        Field::new("Director", DataType::Utf8, true),
        Field::new("Studio", DataType::Utf8, false),
        Field::new("Runtime_Minutes", DataType::Int64, false),
        Field::new("IMDB_Rating", DataType::Float64, false),
        Field::new("Votes", DataType::Int64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(StringArray::from(titles)),
        Arc::new(StringArray::from(genres)),
        Arc::new(StringArray::from(release_dates)),
        Arc::new(Float64Array::from(budgets)),
        Arc::new(Int64Array::from(revenues)),
        Arc::new(StringArray::from(directors)),
        Arc::new(StringArray::from(studios)),
        Arc::new(Int64Array::from(runtimes)),
        Arc::new(Float64Array::from(ratings)),
        Arc::new(Int64Array::from(votes)),
    ];

    RecordBatch::try_new(schema, columns).expect("valid movie batch")
}

/// Sets a random `fraction` of the values to missing.
fn blank_random_rows<T>(values: &mut [Option<T>], fraction: f64, rng: &mut StdRng) {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.shuffle(rng);
    let count = (values.len() as f64 * fraction).round() as usize;
    for &i in indices.iter().take(count) {
        values[i] = None;
    }
}
