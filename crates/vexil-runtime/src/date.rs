//! Date parsing for date property operators
//!
//! Absolute dates come from condition values and supplied properties.
//! Relative dates are compact tokens such as `"7d"` or `"3m"` meaning
//! "that long before now".

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<number>[0-9]+)(?P<interval>[a-z])$").unwrap());

/// Relative offsets at or above this magnitude are rejected
const MAX_RELATIVE_NUMBER: u32 = 10_000;

/// Resolve a relative date token against the current UTC time.
///
/// The clock is sampled on every call, so the same token yields a later
/// cutoff on each evaluation.
pub fn parse_relative_date(token: &str) -> Option<DateTime<Utc>> {
    parse_relative_date_at(token, Utc::now())
}

/// Resolve a relative date token against an explicit instant.
///
/// Grammar: digits followed by one of `h`, `d`, `w`, `m`, `y`. Month and
/// year offsets use calendar arithmetic; a day past the end of the target
/// month is clamped to its last day.
pub fn parse_relative_date_at(token: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let captures = RELATIVE_DATE_PATTERN.captures(token)?;

    // Oversized digit runs fail to parse into u32 and are rejected as well
    let number: u32 = captures["number"].parse().ok()?;
    if number >= MAX_RELATIVE_NUMBER {
        tracing::debug!("Relative date {} exceeds offset limit", token);
        return None;
    }

    match &captures["interval"] {
        "h" => now.checked_sub_signed(Duration::hours(i64::from(number))),
        "d" => now.checked_sub_signed(Duration::days(i64::from(number))),
        "w" => now.checked_sub_signed(Duration::weeks(i64::from(number))),
        "m" => now.checked_sub_months(Months::new(number)),
        "y" => now.checked_sub_months(Months::new(number * 12)),
        _ => None,
    }
}

/// Parse an absolute date or date-time string as a UTC instant.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+05:00`),
/// naive date-times (`2024-01-15T10:30:00`, `2024-01-15 10:30:00`, with
/// optional fractional seconds) treated as UTC, and plain dates
/// (`2024-01-15`) at midnight UTC.
pub fn parse_absolute_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ndt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}
