//! Field names and values exposed by a [`Resource`](crate::Resource).
//!
//! Callers address event fields either through a [`FieldName`] variant or
//! through a friendly string such as `startDate`. Friendly strings go
//! through the alias table below; anything it does not list is taken as a
//! canonical dotted wire path and passed through unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::time;

/// Friendly name → canonical dotted path.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("name", "summary"),
    ("description", "description"),
    ("startDate", "start.date"),
    ("endDate", "end.date"),
    ("startDateTime", "start.dateTime"),
    ("endDateTime", "end.dateTime"),
];

/// Resolves a friendly name to its canonical path.
///
/// Names missing from the alias table are returned unchanged.
pub fn resolve_alias(name: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(friendly, _)| *friendly == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Which half of the event a date field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSide {
    Start,
    End,
}

impl EventSide {
    /// Returns the wire key of this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Whether a date field holds a bare date or a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    /// `YYYY-MM-DD`, all-day events.
    Date,
    /// RFC 3339, timed events.
    DateTime,
}

/// A field of an event resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// Opaque remote identifier (`id`).
    Id,
    /// Event title (`summary`).
    Name,
    /// Free text body (`description`).
    Description,
    /// All-day start (`start.date`).
    StartDate,
    /// All-day end (`end.date`).
    EndDate,
    /// Timed start (`start.dateTime`).
    StartDateTime,
    /// Timed end (`end.dateTime`).
    EndDateTime,
    /// Derived chronological key; read-only.
    SortDate,
    /// Any other wire field, addressed by dotted path.
    Raw(String),
}

impl FieldName {
    /// Parses a friendly name or canonical path.
    pub fn parse(name: &str) -> Self {
        match resolve_alias(name) {
            "id" => Self::Id,
            "summary" => Self::Name,
            "description" => Self::Description,
            "start.date" => Self::StartDate,
            "end.date" => Self::EndDate,
            "start.dateTime" => Self::StartDateTime,
            "end.dateTime" => Self::EndDateTime,
            "sortDate" => Self::SortDate,
            path => Self::Raw(path.to_string()),
        }
    }

    /// Returns the dotted wire path this field reads and writes.
    ///
    /// `SortDate` has no wire path; its friendly name is returned.
    pub fn canonical_path(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Name => "summary",
            Self::Description => "description",
            Self::StartDate => "start.date",
            Self::EndDate => "end.date",
            Self::StartDateTime => "start.dateTime",
            Self::EndDateTime => "end.dateTime",
            Self::SortDate => "sortDate",
            Self::Raw(path) => path,
        }
    }

    /// Returns the user-facing spelling of this field.
    pub fn friendly_name(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::StartDateTime => "startDateTime",
            Self::EndDateTime => "endDateTime",
            Self::SortDate => "sortDate",
            Self::Raw(path) => path,
        }
    }

    /// Returns the side and kind for the four date fields.
    pub fn date_target(&self) -> Option<(EventSide, DateKind)> {
        match self {
            Self::StartDate => Some((EventSide::Start, DateKind::Date)),
            Self::EndDate => Some((EventSide::End, DateKind::Date)),
            Self::StartDateTime => Some((EventSide::Start, DateKind::DateTime)),
            Self::EndDateTime => Some((EventSide::End, DateKind::DateTime)),
            _ => None,
        }
    }
}

impl FromStr for FieldName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}

/// A typed value read from or written to a resource field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// The field is absent.
    #[default]
    Null,
    /// Plain text.
    Text(String),
    /// A calendar date with no time of day.
    Date(NaiveDate),
    /// An instant with its original offset.
    Timestamp(DateTime<FixedOffset>),
    /// An instant in a named zone. The zone travels with it when written
    /// to a date field.
    Zoned(DateTime<Tz>),
    /// Any other JSON value (nested objects, lists, numbers, booleans).
    Json(Value),
}

impl FieldValue {
    /// Wraps a JSON value, unwrapping `null` and strings.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }

    /// Converts to the JSON written into the wire document.
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s),
            Self::Date(d) => Value::String(time::format_date(d)),
            Self::Timestamp(dt) => Value::String(time::format_date_time(&dt)),
            Self::Zoned(dt) => Value::String(time::format_date_time(&dt.fixed_offset())),
            Self::Json(v) => v,
        }
    }

    /// Returns true for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the instant if this is a `Timestamp` or `Zoned` value.
    pub fn as_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(dt) => Some(*dt),
            Self::Zoned(dt) => Some(dt.fixed_offset()),
            _ => None,
        }
    }

    /// Returns the calendar date of a `Date`, `Timestamp` or `Zoned` value.
    ///
    /// For instants this is the date in the value's own offset.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Timestamp(dt) => Some(dt.date_naive()),
            Self::Zoned(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&time::format_date(*d)),
            Self::Timestamp(dt) => f.write_str(&time::format_date_time(dt)),
            Self::Zoned(dt) => f.write_str(&time::format_date_time(&dt.fixed_offset())),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(dt)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(dt.fixed_offset())
    }
}

impl From<DateTime<Tz>> for FieldValue {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
