//! Error types for reading and writing resource fields.

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized Result type for field mapping operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised while mapping between the wire document and typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A value does not match the literal format its field expects.
    #[error("invalid value {value:?} for {field}: {reason}")]
    Format {
        /// Canonical path of the offending field.
        field: String,
        /// The rejected value, as text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A `timeZone` value is not a known IANA zone name.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The field is computed from other fields and cannot be assigned.
    #[error("field {0} is derived and cannot be written")]
    ReadOnlyField(String),

    /// Midnight is skipped in the given zone on that date (DST gap).
    #[error("{date} has no start of day in timezone {timezone}")]
    NonexistentLocalTime {
        /// The calendar date.
        date: NaiveDate,
        /// The zone that skips midnight.
        timezone: String,
    },
}

impl RecordError {
    /// Creates a format error for `field`.
    pub fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error comes from a value that failed to parse.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::UnknownTimezone(_) | Self::NonexistentLocalTime { .. }
        )
    }
}
