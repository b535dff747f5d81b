//! Permissive date/time parsing and interval rendering.
//!
//! The parser accepts the formats people actually type into spreadsheets:
//! ISO dates and datetimes, RFC 3339/2822, US month-first and European
//! day-first dates, month names, compact `YYYYMMDD`, `YYYY-MM` and a bare
//! year. Parsed instants must fit a signed 64-bit nanosecond timestamp
//! (roughly years 1677 to 2262); anything else is rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));
static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})$").expect("valid regex"));
static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// Datetime layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
];

/// Datetime layouts carrying a UTC offset; normalized to UTC.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-only layouts, tried in order. Month-first wins over day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %b, %Y",
    "%A, %b %d, %Y",
];

/// Parses a value as a timestamp, returning `None` if no layout matches.
///
/// ```rust
/// use insight_profiler::temporal::parse_datetime;
///
/// assert!(parse_datetime("2024-01-15").is_some());
/// assert!(parse_datetime("15-01-2024").is_some());
/// assert!(parse_datetime("Jan 15, 2024").is_some());
/// assert!(parse_datetime("2024").is_some());
/// assert!(parse_datetime("not a date").is_none());
/// ```
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_any(value).filter(|dt| dt.and_utc().timestamp_nanos_opt().is_some())
}

fn parse_any(value: &str) -> Option<NaiveDateTime> {
    if BARE_YEAR.is_match(value) {
        let year = value.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    if let Some(caps) = YEAR_MONTH.captures(value) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    if COMPACT_DATE.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_utc());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Renders an interval as `<days> days HH:MM:SS[.fraction]`.
///
/// Fractions are printed with six digits when the interval has whole
/// microseconds and nine digits otherwise.
///
/// ```rust
/// use chrono::TimeDelta;
/// use insight_profiler::temporal::format_interval;
///
/// assert_eq!(format_interval(TimeDelta::days(1)), "1 days 00:00:00");
/// assert_eq!(format_interval(TimeDelta::hours(36)), "1 days 12:00:00");
/// assert_eq!(format_interval(TimeDelta::milliseconds(1500)), "0 days 00:00:01.500000");
/// ```
pub fn format_interval(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();

    let total_seconds = delta.num_seconds();
    let nanos = delta.subsec_nanos();
    let days = total_seconds / 86_400;
    let rem = total_seconds % 86_400;
    let (hours, minutes, seconds) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);

    let fraction = match nanos {
        0 => String::new(),
        n if n % 1_000 == 0 => format!(".{:06}", n / 1_000),
        n => format!(".{n:09}"),
    };

    format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}{fraction}")
}
