//! Date and timestamp conversion for the wire document.
//!
//! The wire format carries two literal shapes:
//! - `YYYY-MM-DD` for all-day events (`start.date`, `end.date`)
//! - RFC 3339 timestamps for timed events (`start.dateTime`, `end.dateTime`)
//!
//! Parsing is strict; a value that does not match its literal shape is a
//! [`RecordError::Format`], never a silent default.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{RecordError, RecordResult};

/// `strftime` pattern of an all-day wire date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Zone used when neither the event nor the caller names one.
pub const DEFAULT_TIME_ZONE: Tz = Tz::UTC;

/// Parses an IANA zone name such as `Europe/Paris`.
pub fn parse_time_zone(name: &str) -> RecordResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| RecordError::UnknownTimezone(name.to_string()))
}

/// Parses a `YYYY-MM-DD` wire date for `field`.
pub fn parse_date(field: &str, value: &str) -> RecordResult<NaiveDate> {
    // chrono accepts unpadded numbers; the wire format does not.
    if value.len() != 10 {
        return Err(RecordError::format(field, value, "expected YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| RecordError::format(field, value, e.to_string()))
}

/// Parses an RFC 3339 wire timestamp for `field`.
pub fn parse_date_time(field: &str, value: &str) -> RecordResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| RecordError::format(field, value, e.to_string()))
}

/// Returns the first instant of `date` in `tz`.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> RecordResult<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| RecordError::NonexistentLocalTime {
            date,
            timezone: tz.name().to_string(),
        })
}

/// Formats a date in wire form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a timestamp in wire form, keeping its offset.
pub fn format_date_time(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Builds the textual sort key of an instant.
///
/// Keys are fixed-width UTC timestamps, so byte order equals chronological
/// order regardless of the offset the event was written with.
pub fn sort_key(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
