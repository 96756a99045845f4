//! Calendar-date parsing and formatting.
//!
//! The close-approach source encodes approach times as formatted calendar
//! strings like `"1900-Jan-01 00:11"` (UTC, minute precision, abbreviated
//! month names). Internally NeoDB works with [`DateTime<Utc>`]; this module
//! is the boundary where the two representations meet.
//!
//! [`format_timestamp`] renders at minute precision with numeric months.
//! [`parse_calendar`] accepts that rendering as well, so the pair
//! round-trips for any timestamp with no sub-minute component:
//! `parse_calendar(&format_timestamp(t)) == t`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::StructuralError;

/// Accepted input layouts, tried in order. The source's native form comes
/// first; the seconds-bearing and numeric-month variants cover rows with a
/// different time-of-day granularity and our own formatted output.
const CALENDAR_FORMATS: &[&str] = &[
    "%Y-%b-%d %H:%M",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Layouts carrying no time of day at all; these parse to midnight UTC.
const DATE_ONLY_FORMATS: &[&str] = &["%Y-%b-%d", "%Y-%m-%d"];

/// Parses a formatted calendar string into a UTC timestamp.
///
/// # Errors
///
/// Returns [`StructuralError::InvalidCalendarDate`] if the string matches
/// none of the accepted layouts. Dates are assumed well-formed by the
/// source, so the caller treats this as fatal for the whole load.
///
/// # Examples
///
/// ```
/// use neodb::time::parse_calendar;
/// use chrono::{Datelike, Timelike};
///
/// let time = parse_calendar("1900-Jan-01 00:11").unwrap();
/// assert_eq!(time.year(), 1900);
/// assert_eq!(time.minute(), 11);
/// ```
pub fn parse_calendar(calendar_date: &str) -> Result<DateTime<Utc>, StructuralError> {
    let trimmed = calendar_date.trim();

    for format in CALENDAR_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    for format in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
        }
    }

    Err(StructuralError::InvalidCalendarDate {
        value: calendar_date.to_string(),
    })
}

/// Formats a UTC timestamp at minute precision.
///
/// Sub-minute components are dropped: they are significant figures that do
/// not exist in the input data set, so display strings and serialized
/// reports never carry them.
///
/// # Examples
///
/// ```
/// use neodb::time::{format_timestamp, parse_calendar};
///
/// let time = parse_calendar("2021-Aug-21 15:10").unwrap();
/// assert_eq!(format_timestamp(time), "2021-08-21 15:10");
/// ```
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
