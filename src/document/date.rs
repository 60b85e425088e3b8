//! Date formatting for values pulled out of drafts and case records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%b %d, %Y";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date-like string into a calendar date.
///
/// Accepts RFC 3339 timestamps (converted to UTC), plain `YYYY-MM-DD` dates and
/// naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
}

/// Render a date-like value as `Mon DD, YYYY`.
///
/// Empty input renders as an empty string; anything unparseable is passed
/// through untouched.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match parse_date(value) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}
