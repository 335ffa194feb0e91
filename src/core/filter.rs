// LogLens - core/filter.rs
//
// Consumer side of a committed FilterState: applying it to request-log rows
// and encoding it as query parameters for a log query layer.
// All present constraints are AND-combined; an absent field constrains nothing.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{FilterState, RequestLogEntry};

/// Apply filters to a slice of entries, returning indices of matching entries.
///
/// Returns indices into the original slice so the table can render the
/// filtered view without copying rows.
pub fn apply_filters(entries: &[RequestLogEntry], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..entries.len()).collect();
    }

    let endpoint_lower = filter.endpoint.as_deref().map(str::to_lowercase);

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_all(entry, filter, endpoint_lower.as_deref()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single entry matches all active filters.
fn matches_all(entry: &RequestLogEntry, filter: &FilterState, endpoint_lower: Option<&str>) -> bool {
    if let Some(method) = filter.method {
        if !entry.method.eq_ignore_ascii_case(method.as_str()) {
            return false;
        }
    }

    if let Some(ref status) = filter.status {
        if status.trim() != entry.status.to_string() {
            return false;
        }
    }

    if let Some(ref ip) = filter.ip_address {
        if ip.trim() != entry.ip_address {
            return false;
        }
    }

    // Endpoint search (case-insensitive substring)
    if let Some(needle) = endpoint_lower {
        if !entry.endpoint.to_lowercase().contains(needle) {
            return false;
        }
    }

    if let Some(ref user) = filter.user_uuid {
        if entry.user_uuid.as_deref() != Some(user.trim()) {
            return false;
        }
    }

    // Inclusive time bounds on whole seconds
    let ts = entry.created_at.timestamp();
    if filter.start_time.is_some_and(|start| ts < start) {
        return false;
    }
    if filter.end_time.is_some_and(|end| ts > end) {
        return false;
    }

    true
}

/// Encode the filter as query-string pairs, omitting absent fields.
pub fn to_query_pairs(filter: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(method) = filter.method {
        pairs.push(("method", method.to_string()));
    }
    if let Some(ref status) = filter.status {
        pairs.push(("status", status.clone()));
    }
    if let Some(ref ip) = filter.ip_address {
        pairs.push(("ipAddress", ip.clone()));
    }
    if let Some(ref endpoint) = filter.endpoint {
        pairs.push(("endpoint", endpoint.clone()));
    }
    if let Some(ref user) = filter.user_uuid {
        pairs.push(("userUuid", user.clone()));
    }
    if let Some(start) = filter.start_time {
        pairs.push(("startTime", start.to_string()));
    }
    if let Some(end) = filter.end_time {
        pairs.push(("endTime", end.to_string()));
    }
    pairs
}

/// Render query pairs as an `application/x-www-form-urlencoded` string.
pub fn to_query_string(filter: &FilterState) -> String {
    match serde_urlencoded::to_string(to_query_pairs(filter)) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode filter query string");
            String::new()
        }
    }
}
