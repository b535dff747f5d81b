//! Arrow array to typed cell conversion.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    ArrowTemporalType, DataType, Date32Type, Date64Type, Float64Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::{CellValue, Column, StorageType};
use crate::error::Result;

/// Maps an Arrow data type onto the storage classes the profiler reasons about.
pub(crate) fn storage_type(data_type: &DataType) -> StorageType {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => StorageType::Integer,
        DataType::UInt64
        | DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => StorageType::Float,
        DataType::Boolean => StorageType::Boolean,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => StorageType::Temporal,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => StorageType::Text,
        DataType::Dictionary(_, value)
            if matches!(
                value.as_ref(),
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
            ) =>
        {
            StorageType::Text
        }
        _ => StorageType::Other,
    }
}

/// Converts one Arrow array into a [`Column`] of owned cells.
pub(super) fn column_from_array(name: &str, array: &ArrayRef) -> Result<Column> {
    let storage = storage_type(array.data_type());
    let cells = match storage {
        StorageType::Integer => integer_cells(array)?,
        StorageType::Float => float_cells(array)?,
        StorageType::Boolean => array
            .as_boolean()
            .iter()
            .map(|v| v.map_or(CellValue::Missing, CellValue::Boolean))
            .collect(),
        StorageType::Temporal => temporal_cells(array),
        StorageType::Text => text_cells(array)?,
        StorageType::Other => formatted_cells(array)?,
    };
    Ok(Column::new(name, storage, cells))
}

fn integer_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let values = cast(array, &DataType::Int64)?;
    Ok(values
        .as_primitive::<Int64Type>()
        .iter()
        .map(|v| v.map_or(CellValue::Missing, CellValue::Integer))
        .collect())
}

fn float_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let values = cast(array, &DataType::Float64)?;
    Ok(values
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| match v {
            Some(v) if !v.is_nan() => CellValue::Float(v),
            _ => CellValue::Missing,
        })
        .collect())
}

fn temporal_cells(array: &ArrayRef) -> Vec<CellValue> {
    match array.data_type() {
        DataType::Date32 => datetimes::<Date32Type>(array),
        DataType::Date64 => datetimes::<Date64Type>(array),
        DataType::Timestamp(TimeUnit::Second, _) => datetimes::<TimestampSecondType>(array),
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            datetimes::<TimestampMillisecondType>(array)
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            datetimes::<TimestampMicrosecondType>(array)
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            datetimes::<TimestampNanosecondType>(array)
        }
        _ => vec![CellValue::Missing; array.len()],
    }
}

fn datetimes<T>(array: &ArrayRef) -> Vec<CellValue>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    let values = array.as_primitive::<T>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                return CellValue::Missing;
            }
            // Out-of-range instants cannot be represented and count as missing.
            values
                .value_as_datetime(i)
                .map_or(CellValue::Missing, CellValue::Temporal)
        })
        .collect()
}

fn text_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let values = cast(array, &DataType::Utf8)?;
    Ok(values
        .as_string::<i32>()
        .iter()
        .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.to_string())))
        .collect())
}

fn formatted_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    // NullArray carries no validity buffer, so ask for logical nulls.
    let nulls = array.logical_nulls();
    let is_null = |i: usize| nulls.as_ref().is_some_and(|n| n.is_null(i));

    if matches!(array.data_type(), DataType::Null) {
        return Ok(vec![CellValue::Missing; array.len()]);
    }

    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    Ok((0..array.len())
        .map(|i| {
            if is_null(i) {
                CellValue::Missing
            } else {
                CellValue::Text(formatter.value(i).to_string())
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        BooleanArray, Date32Array, Float32Array, Int32Array, NullArray, StringArray,
        TimestampSecondArray, UInt64Array,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn test_integer_conversion() {
        let array: ArrayRef = Arc::new(Int32Array::from(vec![Some(1), None, Some(-3)]));
        let column = column_from_array("n", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Integer);
        assert_eq!(
            column.cells(),
            &[
                CellValue::Integer(1),
                CellValue::Missing,
                CellValue::Integer(-3)
            ]
        );
    }

    #[test]
    fn test_float_nan_is_missing() {
        let array: ArrayRef = Arc::new(Float32Array::from(vec![Some(1.5), Some(f32::NAN), None]));
        let column = column_from_array("f", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Float);
        assert_eq!(column.missing_count(), 2);
    }

    #[test]
    fn test_uint64_is_float_storage() {
        let array: ArrayRef = Arc::new(UInt64Array::from(vec![u64::MAX, 1]));
        let column = column_from_array("u", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Float);
        assert_eq!(column.non_missing_count(), 2);
    }

    #[test]
    fn test_boolean_conversion() {
        let array: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None]));
        let column = column_from_array("b", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Boolean);
        assert_eq!(column.cells()[0], CellValue::Boolean(true));
        assert!(column.cells()[1].is_missing());
    }

    #[test]
    fn test_date32_conversion() {
        let array: ArrayRef = Arc::new(Date32Array::from(vec![Some(19_737), None]));
        let column = column_from_array("d", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Temporal);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(column.cells()[0], CellValue::Temporal(expected));
    }

    #[test]
    fn test_timestamp_conversion() {
        let array: ArrayRef = Arc::new(TimestampSecondArray::from(vec![Some(86_400)]));
        let column = column_from_array("ts", &array).unwrap();
        let expected = NaiveDate::from_ymd_opt(1970, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(column.cells()[0], CellValue::Temporal(expected));
    }

    #[test]
    fn test_text_conversion() {
        let array: ArrayRef = Arc::new(StringArray::from(vec![Some("a"), None]));
        let column = column_from_array("s", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Text);
        assert_eq!(column.cells()[0], CellValue::Text("a".to_string()));
    }

    #[test]
    fn test_null_array_is_all_missing() {
        let array: ArrayRef = Arc::new(NullArray::new(3));
        let column = column_from_array("nothing", &array).unwrap();
        assert_eq!(column.storage(), StorageType::Other);
        assert_eq!(column.missing_count(), 3);
    }
}
