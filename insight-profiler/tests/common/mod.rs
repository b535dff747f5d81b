//! Shared builders for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use insight_profiler::prelude::*;

/// Builds a batch from named arrays. Nullability is taken from the arrays.
pub fn batch_of(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

pub fn floats(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

pub fn ints(values: &[i64]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

pub fn texts(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

pub fn bools(values: &[bool]) -> ArrayRef {
    Arc::new(BooleanArray::from(values.to_vec()))
}

/// Profiles a batch with the default configuration.
pub fn profile(batch: &RecordBatch) -> ProfileResult {
    Profiler::builder().build().unwrap().profile_batch(batch).unwrap()
}

/// `rows` rows where the last `duplicates` rows repeat earlier ones.
pub fn duplicated_rows(rows: usize, duplicates: usize) -> RecordBatch {
    let distinct = rows - duplicates;
    let buckets: Vec<i64> = (0..rows).map(|i| ((i % distinct) % 7) as i64).collect();
    let labels: Vec<String> = (0..rows).map(|i| format!("row-{}", i % distinct)).collect();
    batch_of(vec![
        ("bucket", ints(&buckets)),
        ("label", Arc::new(StringArray::from(labels)) as ArrayRef),
    ])
}

/// A small orders table covering every column class.
pub fn orders() -> RecordBatch {
    batch_of(vec![
        ("order_id", ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])),
        (
            "amount",
            floats(&[
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
            ]),
        ),
        ("quantity", ints(&[1, 2, 2, 1, 1, 20, 1, 2, 1, 1])),
        (
            "status",
            texts(&[
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
            ]),
        ),
        (
            "order_date",
            texts(&[
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
            ]),
        ),
        (
            "is_gift",
            bools(&[
                true, false, false, false, true, false, false, false, false, false,
            ]),
        ),
        ("region", texts(&[Some("EU"); 10])),
        ("notes", texts(&[None; 10])),
    ])
}
