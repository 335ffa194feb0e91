// LogLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// HTTP method
// =============================================================================

/// HTTP verbs a request-log filter can constrain on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Returns all variants in selector order.
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ]
    }

    /// Wire name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Filter state (committed)
// =============================================================================

/// The committed, externally visible set of request-log constraints.
///
/// Every field is optional; consumers treat an absent field as "no
/// constraint on this dimension". `start_time`/`end_time` are inclusive UTC
/// epoch seconds. `start_time <= end_time` is expected but not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Endpoint substring pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl FilterState {
    /// Returns true if no constraint of any kind is set.
    pub fn is_empty(&self) -> bool {
        !self.has_non_time_filters() && self.start_time.is_none() && self.end_time.is_none()
    }

    /// Returns true if any field other than the time bounds is set.
    pub fn has_non_time_filters(&self) -> bool {
        self.method.is_some()
            || self.status.is_some()
            || self.ip_address.is_some()
            || self.endpoint.is_some()
            || self.user_uuid.is_some()
    }

    /// Current time bounds as a pair.
    pub fn bounds(&self) -> TimeBounds {
        TimeBounds {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Replace both time bounds. A `None` side removes that bound.
    pub fn set_bounds(&mut self, bounds: TimeBounds) {
        self.start_time = bounds.start_time;
        self.end_time = bounds.end_time;
    }

    /// Read a free-text field.
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::IpAddress => self.ip_address.as_deref(),
            TextField::Endpoint => self.endpoint.as_deref(),
            TextField::UserUuid => self.user_uuid.as_deref(),
        }
    }

    /// Set or clear a free-text field. Empty strings clear the field.
    pub fn set_text(&mut self, field: TextField, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match field {
            TextField::IpAddress => self.ip_address = value,
            TextField::Endpoint => self.endpoint = value,
            TextField::UserUuid => self.user_uuid = value,
        }
    }
}

/// UTC epoch-second boundaries of a time filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

/// Free-text filter fields. These commit after a quiet period rather than
/// on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    IpAddress,
    Endpoint,
    UserUuid,
}

impl TextField {
    /// Returns all variants in toolbar order.
    pub fn all() -> &'static [TextField] {
        &[TextField::IpAddress, TextField::Endpoint, TextField::UserUuid]
    }

    /// Placeholder text for the input.
    pub fn hint(&self) -> &'static str {
        match self {
            TextField::IpAddress => "IP Address",
            TextField::Endpoint => "Search endpoint...",
            TextField::UserUuid => "User UUID",
        }
    }
}

// =============================================================================
// Local (wall-clock) selection
// =============================================================================

/// A local calendar date range with no time-of-day attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A range covering exactly the two given dates.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }
}

/// What the user sees and edits: a local date range plus start and end
/// time-of-day, interpreted in some timezone only at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSelection {
    pub range: DateRange,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl LocalSelection {
    /// A range spanning whole days: 00:00:00 on `from` to 23:59:59 on `to`.
    pub fn whole_days(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            range: DateRange::between(from, to),
            start: crate::core::clock::default_start(),
            end: crate::core::clock::default_end(),
        }
    }

    /// True if both times are the whole-day defaults.
    pub fn spans_whole_days(&self) -> bool {
        self.start == crate::core::clock::default_start()
            && self.end == crate::core::clock::default_end()
    }
}

// =============================================================================
// Request log entry (consumer side)
// =============================================================================

/// One row of the `api_logs` request log, as exported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub uuid: String,

    #[serde(default)]
    pub user_uuid: Option<String>,

    /// HTTP verb as recorded (not validated against `HttpMethod`).
    pub method: String,

    pub status: u16,

    pub endpoint: String,

    pub ip_address: String,

    #[serde(default)]
    pub user_agent: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_state_serialises_camel_case_and_omits_absent() {
        let filters = FilterState {
            method: Some(HttpMethod::Get),
            ip_address: Some("10.0.0.1".to_string()),
            start_time: Some(1_700_000_000),
            ..Default::default()
        };
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(
            json,
            r#"{"method":"GET","ipAddress":"10.0.0.1","startTime":1700000000}"#
        );
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn test_http_method_wire_form_is_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        let parsed: HttpMethod = serde_json::from_str(r#""DELETE""#).unwrap();
        assert_eq!(parsed, HttpMethod::Delete);
        assert!(serde_json::from_str::<HttpMethod>(r#""OPTIONS""#).is_err());
    }

    #[test]
    fn test_set_text_empty_clears_field() {
        let mut filters = FilterState::default();
        filters.set_text(TextField::Endpoint, Some("/api".to_string()));
        assert_eq!(filters.text(TextField::Endpoint), Some("/api"));
        filters.set_text(TextField::Endpoint, Some(String::new()));
        assert_eq!(filters.endpoint, None);
    }

    #[test]
    fn test_has_non_time_filters_ignores_bounds() {
        let filters = FilterState {
            start_time: Some(1),
            end_time: Some(2),
            ..Default::default()
        };
        assert!(!filters.has_non_time_filters());
        assert!(!filters.is_empty());
        assert!(FilterState::default().is_empty());
    }
}
