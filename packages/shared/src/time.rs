//! Time helpers for parsing and displaying backend timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse an RFC 3339 timestamp as sent by the backend (`CreatedAt`, `UpdatedAt`).
pub fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

/// Parse a calendar date from the first ten characters (`YYYY-MM-DD`).
///
/// The backend returns birth dates either as a bare date or as a full
/// timestamp; only the date part is meaningful.
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let prefix = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Date and time as shown on feed cards and comments.
pub fn format_datetime(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Time of day as shown on chat bubbles.
pub fn format_time(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Date in the wire format used by the profile and registration forms.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
