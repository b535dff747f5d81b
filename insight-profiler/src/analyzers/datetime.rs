//! Range and frequency statistics for datetime columns.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};

use super::errors::{ColumnError, ColumnResult};
use super::percentage;
use super::profile_types::DatetimeStats;
use crate::dataset::{CellValue, Column};
use crate::temporal::{format_interval, parse_datetime};

/// Reported when the most common gap between timestamps is zero.
pub const UNKNOWN_FREQUENCY: &str = "Unknown";

/// Computes [`DatetimeStats`] for one column.
///
/// Text values are coerced with the permissive date parser; values that
/// fail to parse are counted as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatetimeStatistician;

impl DatetimeStatistician {
    pub fn new() -> Self {
        Self
    }

    pub fn profile(&self, column: &Column) -> ColumnResult<DatetimeStats> {
        let mut timestamps: Vec<NaiveDateTime> =
            column.cells().iter().filter_map(coerce).collect();
        if timestamps.is_empty() {
            return Err(ColumnError::NoValidDatetimes);
        }

        let rows = column.len();
        let missing = rows - timestamps.len();
        timestamps.sort_unstable();

        let min_date = timestamps[0];
        let max_date = timestamps[timestamps.len() - 1];

        Ok(DatetimeStats {
            count: timestamps.len(),
            missing,
            missing_pct: percentage(missing, rows),
            min_date,
            max_date,
            range_days: (max_date - min_date).num_days(),
            inferred_frequency: infer_frequency(&timestamps),
        })
    }
}

fn coerce(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Temporal(ts) => Some(*ts),
        CellValue::Text(text) => parse_datetime(text),
        _ => None,
    }
}

/// Most common gap between consecutive sorted timestamps.
///
/// Ties go to the smallest gap. `None` with fewer than two timestamps.
fn infer_frequency(sorted: &[NaiveDateTime]) -> Option<String> {
    if sorted.len() < 2 {
        return None;
    }

    let mut gaps: BTreeMap<TimeDelta, usize> = BTreeMap::new();
    for pair in sorted.windows(2) {
        *gaps.entry(pair[1] - pair[0]).or_default() += 1;
    }

    let mut mode: Option<(TimeDelta, usize)> = None;
    for (gap, count) in gaps {
        match mode {
            Some((_, best)) if count <= best => {}
            _ => mode = Some((gap, count)),
        }
    }

    mode.map(|(gap, _)| {
        if gap == TimeDelta::zero() {
            UNKNOWN_FREQUENCY.to_string()
        } else {
            format_interval(gap)
        }
    })
}
