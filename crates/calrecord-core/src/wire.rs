//! Wire document exchanged with a remote calendar store.
//!
//! [`WireEvent`] mirrors the Google Calendar event resource closely enough
//! to round-trip it: the fields this crate interprets are typed, and every
//! other key is kept verbatim in a flattened `extra` map so that an update
//! never drops data the store sent.
//!
//! ```text
//! { "id": "…", "summary": "…", "description": "…",
//!   "start": { "date" | "dateTime": "…", "timeZone": "…" },
//!   "end":   { "date" | "dateTime": "…", "timeZone": "…" },
//!   "attendees": [ { "email": "…", … } ],
//!   …extra }
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordResult;
use crate::field::EventSide;
use crate::time;

/// A calendar event as it travels over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    /// Opaque identifier; empty until the store assigns one.
    #[serde(
        default,
        deserialize_with = "deserialize_opaque_id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    /// Event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Event body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the event starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<WireEventTime>,

    /// When the event ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<WireEventTime>,

    /// Attendee list. `None` leaves the store's list untouched on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,

    /// Every other field, preserved as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireEvent {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one side of the event.
    pub fn side(&self, side: EventSide) -> Option<&WireEventTime> {
        match side {
            EventSide::Start => self.start.as_ref(),
            EventSide::End => self.end.as_ref(),
        }
    }

    /// Returns one side of the event for replacement.
    pub fn side_mut(&mut self, side: EventSide) -> &mut Option<WireEventTime> {
        match side {
            EventSide::Start => &mut self.start,
            EventSide::End => &mut self.end,
        }
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the start.
    pub fn with_start(mut self, start: WireEventTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: WireEventTime) -> Self {
        self.end = Some(end);
        self
    }
}

/// Identifiers are opaque strings; numeric ids are kept as their decimal text.
fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "event id must be a string, got {other}"
        ))),
    }
}

/// The literal carried by one side of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTimeValue {
    /// `YYYY-MM-DD`, all-day.
    Date(String),
    /// RFC 3339 timestamp.
    DateTime(String),
    /// Both keys, as some stores send them. Kept so an update writes back
    /// what was read.
    Both { date: String, date_time: String },
}

/// One side (`start` or `end`) of an event.
///
/// At least one of `date`/`dateTime` is held. Literals are stored as
/// received and parsed on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEventTimeRepr", into = "WireEventTimeRepr")]
pub struct WireEventTime {
    /// Date or timestamp literal.
    pub value: EventTimeValue,
    /// IANA zone the event was written in.
    pub time_zone: Option<String>,
    /// Unmodelled keys of this side.
    pub extra: Map<String, Value>,
}

impl WireEventTime {
    /// Creates a side from a literal.
    pub fn new(value: EventTimeValue) -> Self {
        Self {
            value,
            time_zone: None,
            extra: Map::new(),
        }
    }

    /// Creates an all-day side.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(EventTimeValue::Date(time::format_date(date)))
    }

    /// Creates a timed side.
    pub fn from_date_time(dt: &DateTime<FixedOffset>) -> Self {
        Self::new(EventTimeValue::DateTime(time::format_date_time(dt)))
    }

    /// Builder method to set the zone name.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Returns true if this side has a date and no timestamp.
    pub fn is_all_day(&self) -> bool {
        matches!(self.value, EventTimeValue::Date(_))
    }

    /// Returns the `date` literal, if present.
    pub fn date(&self) -> Option<&str> {
        match &self.value {
            EventTimeValue::Date(date) | EventTimeValue::Both { date, .. } => Some(date),
            EventTimeValue::DateTime(_) => None,
        }
    }

    /// Returns the `dateTime` literal, if present.
    pub fn date_time(&self) -> Option<&str> {
        match &self.value {
            EventTimeValue::DateTime(date_time) | EventTimeValue::Both { date_time, .. } => {
                Some(date_time)
            }
            EventTimeValue::Date(_) => None,
        }
    }

    /// Resolves the side's zone, using `fallback` when none is named.
    pub fn zone(&self, fallback: Tz) -> RecordResult<Tz> {
        match self.time_zone.as_deref() {
            Some(name) if !name.is_empty() => time::parse_time_zone(name),
            _ => Ok(fallback),
        }
    }

    /// Returns the instant this side denotes.
    ///
    /// The date wins when both literals are present; it resolves to the
    /// start of the day in the side's zone.
    pub fn instant(&self, side: EventSide, fallback: Tz) -> RecordResult<DateTime<FixedOffset>> {
        match &self.value {
            EventTimeValue::Date(raw) | EventTimeValue::Both { date: raw, .. } => {
                self.start_of_date(side, raw, fallback)
            }
            EventTimeValue::DateTime(raw) => parse_side_date_time(side, raw),
        }
    }

    /// Returns the start of the `date` literal's day, if present.
    pub fn date_instant(
        &self,
        side: EventSide,
        fallback: Tz,
    ) -> RecordResult<Option<DateTime<FixedOffset>>> {
        self.date()
            .map(|raw| self.start_of_date(side, raw, fallback))
            .transpose()
    }

    /// Returns the parsed `dateTime` literal, if present.
    pub fn date_time_instant(
        &self,
        side: EventSide,
    ) -> RecordResult<Option<DateTime<FixedOffset>>> {
        self.date_time()
            .map(|raw| parse_side_date_time(side, raw))
            .transpose()
    }

    fn start_of_date(
        &self,
        side: EventSide,
        raw: &str,
        fallback: Tz,
    ) -> RecordResult<DateTime<FixedOffset>> {
        let date = time::parse_date(&format!("{}.date", side.as_str()), raw)?;
        Ok(time::start_of_day(date, self.zone(fallback)?)?.fixed_offset())
    }
}

fn parse_side_date_time(side: EventSide, raw: &str) -> RecordResult<DateTime<FixedOffset>> {
    time::parse_date_time(&format!("{}.dateTime", side.as_str()), raw)
}

/// Flat wire shape of [`WireEventTime`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEventTimeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<WireEventTimeRepr> for WireEventTime {
    type Error = String;

    fn try_from(repr: WireEventTimeRepr) -> Result<Self, Self::Error> {
        let value = match (repr.date, repr.date_time) {
            (Some(date), Some(date_time)) => EventTimeValue::Both { date, date_time },
            (Some(date), None) => EventTimeValue::Date(date),
            (None, Some(date_time)) => EventTimeValue::DateTime(date_time),
            (None, None) => return Err("event time needs either date or dateTime".to_string()),
        };
        Ok(Self {
            value,
            time_zone: repr.time_zone,
            extra: repr.extra,
        })
    }
}

impl From<WireEventTime> for WireEventTimeRepr {
    fn from(time: WireEventTime) -> Self {
        let (date, date_time) = match time.value {
            EventTimeValue::Date(date) => (Some(date), None),
            EventTimeValue::DateTime(date_time) => (None, Some(date_time)),
            EventTimeValue::Both { date, date_time } => (Some(date), Some(date_time)),
        };
        Self {
            date,
            date_time,
            time_zone: time.time_zone,
            extra: time.extra,
        }
    }
}

/// An attendee's answer to the invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    NeedsAction,
    Declined,
    Tentative,
    Accepted,
    #[serde(other)]
    Unknown,
}

/// One entry of an event's attendee list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    /// Email address; the only field stores require.
    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<ResponseStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_guests: Option<u32>,

    /// Set by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<bool>,

    /// Set by the store for the authenticated user's own entry.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub is_self: Option<bool>,

    /// Set by the store for rooms and equipment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attendee {
    /// Creates an attendee with the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder method to mark the attendee optional.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Builder method to set the response status.
    pub fn with_response_status(mut self, status: ResponseStatus) -> Self {
        self.response_status = Some(status);
        self
    }

    /// Builder method to set a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
