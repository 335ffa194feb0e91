// LogLens - core/translate.rs
//
// Translation between the local wall-clock selection the user edits and the
// UTC epoch-second bounds the log query consumes.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::clock;
use crate::core::model::{DateRange, FilterState, LocalSelection, TimeBounds};
use crate::core::timezone::{local_to_utc, local_today, utc_to_local};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Convert a local selection into inclusive UTC epoch-second bounds.
///
/// Each side is composed from its date and time-of-day, interpreted in `tz`
/// and floored to whole seconds. A missing date leaves that side unbounded.
pub fn commit_bounds(selection: &LocalSelection, tz: Tz) -> TimeBounds {
    TimeBounds {
        start_time: selection
            .range
            .from
            .map(|date| local_to_utc(date, selection.start, tz).timestamp()),
        end_time: selection
            .range
            .to
            .map(|date| local_to_utc(date, selection.end, tz).timestamp()),
    }
}

/// Inverse of [`commit_bounds`]: the local selection a user in `tz` would
/// see for `bounds`.
///
/// Missing sides fall back to today's date (at `now`) with 00:00:00 for the
/// start and 23:59:59 for the end.
pub fn expand_bounds(bounds: TimeBounds, tz: Tz, now: DateTime<Utc>) -> LocalSelection {
    let today = local_today(now, tz);
    let start = bounds.start_time.and_then(|secs| utc_to_local(secs, tz));
    let end = bounds.end_time.and_then(|secs| utc_to_local(secs, tz));

    LocalSelection {
        range: DateRange {
            from: Some(start.map(|dt| dt.date()).unwrap_or(today)),
            to: Some(end.map(|dt| dt.date()).unwrap_or(today)),
        },
        start: start.map(|dt| dt.time()).unwrap_or_else(clock::default_start),
        end: end.map(|dt| dt.time()).unwrap_or_else(clock::default_end),
    }
}

/// Today's whole-day selection in `tz`.
pub fn today_selection(tz: Tz, now: DateTime<Utc>) -> LocalSelection {
    let today = local_today(now, tz);
    LocalSelection::whole_days(today, today)
}

/// UTC bounds of today's whole-day selection in `tz`; the default filter.
pub fn today_bounds(tz: Tz, now: DateTime<Utc>) -> TimeBounds {
    commit_bounds(&today_selection(tz, now), tz)
}

/// The default filter state: today in `tz`, nothing else constrained.
pub fn default_filters(tz: Tz, now: DateTime<Utc>) -> FilterState {
    let mut filters = FilterState::default();
    filters.set_bounds(today_bounds(tz, now));
    filters
}

/// True if `filters` differs from the default state: time bounds other than
/// today in `tz`, or any non-time field set. Drives the "clear filters"
/// affordance.
pub fn is_non_default(filters: &FilterState, tz: Tz, now: DateTime<Utc>) -> bool {
    filters.bounds() != today_bounds(tz, now) || filters.has_non_time_filters()
}
