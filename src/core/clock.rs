// LogLens - core/clock.rs
//
// Time-of-day and calendar-date text handling for the filter inputs.
//
// Time inputs are constrained widgets, so malformed text is unexpected; when
// it does happen the value falls back to the documented default for that
// side of the range instead of surfacing an error.

use crate::util::constants::{
    DATE_INPUT_FORMAT, MAX_INPUT_YEAR, MIN_INPUT_YEAR, TIME_OF_DAY_FORMAT,
    TIME_OF_DAY_SHORT_FORMAT,
};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// 00:00:00, the start-of-range default.
pub fn default_start() -> NaiveTime {
    NaiveTime::MIN
}

/// 23:59:59, the end-of-range default.
pub fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Parse `HH:MM:SS` (or `HH:MM`) into a time-of-day, falling back to
/// `fallback` on malformed input. Sub-second precision is dropped.
pub fn parse_time_of_day(input: &str, fallback: NaiveTime) -> NaiveTime {
    let trimmed = input.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, TIME_OF_DAY_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_OF_DAY_SHORT_FORMAT));
    match parsed {
        Ok(t) => t.with_nanosecond(0).unwrap_or(t),
        Err(e) => {
            tracing::debug!(
                input = trimmed,
                error = %e,
                fallback = %format_time_of_day(fallback),
                "Malformed time-of-day; using default"
            );
            fallback
        }
    }
}

/// Parse a range-start time, defaulting to 00:00:00.
pub fn parse_start(input: &str) -> NaiveTime {
    parse_time_of_day(input, default_start())
}

/// Parse a range-end time, defaulting to 23:59:59.
pub fn parse_end(input: &str) -> NaiveTime {
    parse_time_of_day(input, default_end())
}

/// Render a time-of-day as `HH:MM:SS`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date input. Empty or malformed text, and years
/// outside `MIN_INPUT_YEAR..=MAX_INPUT_YEAR`, yield `None`.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .ok()
        .filter(|d| (MIN_INPUT_YEAR..=MAX_INPUT_YEAR).contains(&d.year()))
}

/// Render a date as `YYYY-MM-DD` for the date inputs.
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}
