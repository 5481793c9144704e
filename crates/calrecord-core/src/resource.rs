//! The event resource mapper.
//!
//! A [`Resource`] owns one [`WireEvent`] and exposes it through named
//! fields. Reads and writes of the four date fields convert between wire
//! literals and typed values; every other field is a plain read or write at
//! its canonical path.
//!
//! A resource never talks to a store itself. Persistence goes through the
//! repository in `calrecord-store`, which hands back a rebuilt resource.

use chrono_tz::Tz;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{RecordError, RecordResult};
use crate::field::{DateKind, EventSide, FieldName, FieldValue};
use crate::time;
use crate::wire::{Attendee, EventTimeValue, WireEvent, WireEventTime};

/// Local view of one remote calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    wire: WireEvent,
    calendar_id: Option<String>,
    attendees: Vec<Attendee>,
    time_zone: Tz,
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource {
    /// Creates an empty resource, not yet bound to a calendar.
    pub fn new() -> Self {
        Self {
            wire: WireEvent::default(),
            calendar_id: None,
            attendees: Vec::new(),
            time_zone: time::DEFAULT_TIME_ZONE,
        }
    }

    /// Wraps a document returned by a store, bound to its calendar.
    pub fn from_remote(wire: WireEvent, calendar_id: impl Into<String>) -> Self {
        Self {
            wire,
            calendar_id: Some(calendar_id.into()),
            ..Self::new()
        }
    }

    /// Builder method to set the zone used for new date values and for
    /// sides that do not name one.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Builder method to bind the resource to a calendar.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    /// Returns the bound calendar, if any.
    pub fn calendar_id(&self) -> Option<&str> {
        self.calendar_id.as_deref()
    }

    /// Returns the default zone of this resource.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Returns the remote identifier; empty until persisted.
    pub fn id(&self) -> &str {
        &self.wire.id
    }

    /// Returns the event title.
    pub fn name(&self) -> Option<&str> {
        self.wire.summary.as_deref()
    }

    /// Returns the event description.
    pub fn description(&self) -> Option<&str> {
        self.wire.description.as_deref()
    }

    /// Returns the start side, if set.
    pub fn start(&self) -> Option<&WireEventTime> {
        self.wire.start.as_ref()
    }

    /// Returns the end side, if set.
    pub fn end(&self) -> Option<&WireEventTime> {
        self.wire.end.as_ref()
    }

    /// Returns the wire document as currently held.
    pub fn wire(&self) -> &WireEvent {
        &self.wire
    }

    /// Returns attendees added locally since this resource was built.
    pub fn pending_attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// Returns true if the event has been persisted remotely.
    pub fn exists(&self) -> bool {
        !self.wire.id.is_empty()
    }

    /// Returns true if the event has no timed start.
    pub fn is_all_day_event(&self) -> bool {
        !self
            .wire
            .start
            .as_ref()
            .is_some_and(|start| start.date_time().is_some())
    }

    /// Returns the chronological sort key of this event.
    ///
    /// The all-day start wins over the timed start; an event with neither
    /// yields an empty key.
    pub fn sort_date(&self) -> RecordResult<String> {
        for field in [FieldName::StartDate, FieldName::StartDateTime] {
            if let FieldValue::Timestamp(start) = self.get(&field)? {
                return Ok(time::sort_key(&start));
            }
        }
        Ok(String::new())
    }

    /// Queues an attendee for the next save.
    pub fn add_attendee(&mut self, attendee: Attendee) {
        self.attendees.push(attendee);
    }

    /// Returns the body to send on save.
    ///
    /// The queued attendees replace the document's attendee list.
    pub fn to_wire(&self) -> WireEvent {
        let mut wire = self.wire.clone();
        wire.attendees = Some(self.attendees.clone());
        wire
    }

    /// Reads a field by friendly name or canonical path.
    pub fn get_named(&self, name: &str) -> RecordResult<FieldValue> {
        self.get(&FieldName::parse(name))
    }

    /// Reads a field.
    ///
    /// Absent fields read as [`FieldValue::Null`]. Date fields read as
    /// timestamps: all-day dates at the start of the day in the event's
    /// zone, timed values with their written offset.
    pub fn get(&self, field: &FieldName) -> RecordResult<FieldValue> {
        if let Some((side, kind)) = field.date_target() {
            return self.read_date(side, kind);
        }
        match field {
            FieldName::Id if self.wire.id.is_empty() => Ok(FieldValue::Null),
            FieldName::Id => Ok(FieldValue::Text(self.wire.id.clone())),
            FieldName::Name => Ok(self.wire.summary.clone().into()),
            FieldName::Description => Ok(self.wire.description.clone().into()),
            FieldName::SortDate => Ok(FieldValue::Text(self.sort_date()?)),
            other => self.read_path(other.canonical_path()),
        }
    }

    /// Writes a field by friendly name or canonical path.
    pub fn set_named(&mut self, name: &str, value: impl Into<FieldValue>) -> RecordResult<()> {
        self.set(FieldName::parse(name), value)
    }

    /// Writes a field.
    ///
    /// Writing a date field replaces that whole side of the event, so a
    /// `startDateTime` write clears any `startDate` and vice versa.
    pub fn set(&mut self, field: FieldName, value: impl Into<FieldValue>) -> RecordResult<()> {
        let value = value.into();
        if let Some((side, kind)) = field.date_target() {
            return self.assign_date(&field, side, kind, value);
        }
        match field {
            FieldName::Id => {
                self.wire.id = match value {
                    FieldValue::Null => String::new(),
                    FieldValue::Text(id) => id,
                    other => other.to_string(),
                };
                Ok(())
            }
            FieldName::Name => {
                self.wire.summary = text_value(&field, value);
                Ok(())
            }
            FieldName::Description => {
                self.wire.description = text_value(&field, value);
                Ok(())
            }
            FieldName::SortDate => Err(RecordError::ReadOnlyField(field.to_string())),
            FieldName::Raw(path) => self.write_path(&path, value),
            // Date fields returned above.
            _ => Ok(()),
        }
    }

    fn read_date(&self, side: EventSide, kind: DateKind) -> RecordResult<FieldValue> {
        let Some(time) = self.wire.side(side) else {
            return Ok(FieldValue::Null);
        };
        let instant = match kind {
            DateKind::Date => time.date_instant(side, self.time_zone)?,
            DateKind::DateTime => time.date_time_instant(side)?,
        };
        Ok(instant.map_or(FieldValue::Null, FieldValue::Timestamp))
    }

    fn assign_date(
        &mut self,
        field: &FieldName,
        side: EventSide,
        kind: DateKind,
        value: FieldValue,
    ) -> RecordResult<()> {
        let path = field.canonical_path();
        let zone = match &value {
            FieldValue::Zoned(dt) => dt.timezone(),
            _ => self.time_zone,
        };
        let literal = match (kind, value) {
            (_, FieldValue::Null) => {
                *self.wire.side_mut(side) = None;
                return Ok(());
            }
            (DateKind::Date, FieldValue::Date(date)) => {
                EventTimeValue::Date(time::format_date(date))
            }
            (DateKind::Date, FieldValue::Timestamp(dt)) => {
                EventTimeValue::Date(time::format_date(dt.date_naive()))
            }
            (DateKind::Date, FieldValue::Zoned(dt)) => {
                EventTimeValue::Date(time::format_date(dt.date_naive()))
            }
            (DateKind::Date, FieldValue::Text(text)) => {
                EventTimeValue::Date(time::format_date(time::parse_date(path, &text)?))
            }
            (DateKind::DateTime, FieldValue::Timestamp(dt)) => {
                EventTimeValue::DateTime(time::format_date_time(&dt))
            }
            (DateKind::DateTime, FieldValue::Zoned(dt)) => {
                EventTimeValue::DateTime(time::format_date_time(&dt.fixed_offset()))
            }
            (DateKind::DateTime, FieldValue::Date(date)) => {
                let midnight = time::start_of_day(date, self.time_zone)?;
                EventTimeValue::DateTime(time::format_date_time(&midnight.fixed_offset()))
            }
            (DateKind::DateTime, FieldValue::Text(text)) => {
                EventTimeValue::DateTime(time::format_date_time(&time::parse_date_time(
                    path, &text,
                )?))
            }
            (_, json @ FieldValue::Json(_)) => {
                return Err(RecordError::format(
                    path,
                    json.to_string(),
                    "expected a date or timestamp",
                ));
            }
        };
        *self.wire.side_mut(side) = Some(WireEventTime::new(literal).with_time_zone(zone.name()));
        Ok(())
    }

    fn read_path(&self, path: &str) -> RecordResult<FieldValue> {
        if path.is_empty() {
            return Ok(FieldValue::Null);
        }
        let document = self.document(path)?;
        let mut current = &document;
        for segment in path.split('.') {
            let next = match current {
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                other => other.get(segment),
            };
            match next {
                Some(value) => current = value,
                None => return Ok(FieldValue::Null),
            }
        }
        Ok(FieldValue::from_json(current.clone()))
    }

    fn write_path(&mut self, path: &str, value: FieldValue) -> RecordResult<()> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = match segments.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => return Err(RecordError::format(path, value.to_string(), "empty field path")),
        };

        let rendered = value.to_string();
        let not_object = || RecordError::format(path, rendered.clone(), "parent is not an object");
        let mut document = self.document(path)?;
        let mut current = &mut document;
        for segment in segments {
            current = as_object(current)
                .ok_or_else(not_object)?
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        as_object(current)
            .ok_or_else(not_object)?
            .insert(leaf.to_string(), value.into_json());

        self.wire = serde_json::from_value(document)
            .map_err(|e| RecordError::format(path, rendered, e.to_string()))?;
        Ok(())
    }

    fn document(&self, path: &str) -> RecordResult<Value> {
        serde_json::to_value(&self.wire)
            .map_err(|e| RecordError::format(path, "", e.to_string()))
    }
}

/// Coerces a value written to a text field.
fn text_value(field: &FieldName, value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Text(text) => Some(text),
        other => {
            warn!(field = %field, "coercing non-text value to text");
            Some(other.to_string())
        }
    }
}

/// Returns `value` as an object, turning `null` into an empty one.
///
/// Any other non-object is left alone and yields `None`.
fn as_object(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    value.as_object_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ResponseStatus;
    use chrono::{DateTime, NaiveDate, Timelike};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rfc3339(s: &str) -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn hydrated(doc: Value) -> Resource {
        Resource::from_remote(serde_json::from_value(doc).unwrap(), "primary")
    }

    mod construction {
        use super::*;

        #[test]
        fn fresh_resource_is_empty() {
            let resource = Resource::new();
            assert!(!resource.exists());
            assert!(resource.is_all_day_event());
            assert!(resource.calendar_id().is_none());
            assert!(resource.pending_attendees().is_empty());
            assert_eq!(resource.get(&FieldName::Id).unwrap(), FieldValue::Null);
            assert_eq!(resource.sort_date().unwrap(), "");
        }

        #[test]
        fn hydrated_resource_is_bound() {
            let resource = hydrated(json!({"id": "abc", "summary": "Review"}));
            assert!(resource.exists());
            assert_eq!(resource.calendar_id(), Some("primary"));
            assert_eq!(resource.name(), Some("Review"));
        }

        #[test]
        fn all_day_detection_per_construction_path() {
            let all_day = hydrated(json!({
                "start": {"date": "2024-02-01"},
                "end": {"date": "2024-02-02"}
            }));
            let timed = hydrated(json!({
                "start": {"dateTime": "2024-02-01T10:00:00Z"},
                "end": {"dateTime": "2024-02-01T11:00:00Z"}
            }));
            assert!(Resource::new().is_all_day_event());
            assert!(all_day.is_all_day_event());
            assert!(!timed.is_all_day_event());
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn start_date_round_trips_as_start_of_day() {
            let mut resource = Resource::new().with_time_zone(Tz::Europe__Paris);
            resource.set_named("startDate", date(2024, 3, 1)).unwrap();

            let value = resource.get_named("startDate").unwrap();
            let start = value.as_timestamp().unwrap();
            assert_eq!(start.date_naive(), date(2024, 3, 1));
            assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
            assert_eq!(start.offset().local_minus_utc(), 3600);
        }

        #[test]
        fn every_date_alias_round_trips() {
            let mut resource = Resource::new();
            resource.set(FieldName::StartDate, date(2024, 3, 1)).unwrap();
            resource.set(FieldName::EndDate, date(2024, 3, 2)).unwrap();
            assert_eq!(
                resource.get(&FieldName::EndDate).unwrap().as_date(),
                Some(date(2024, 3, 2))
            );

            let start = rfc3339("2024-03-01T09:00:00+02:00");
            let end = rfc3339("2024-03-01T10:00:00+02:00");
            resource.set(FieldName::StartDateTime, start).unwrap();
            resource.set(FieldName::EndDateTime, end).unwrap();
            assert_eq!(
                resource.get(&FieldName::StartDateTime).unwrap(),
                FieldValue::Timestamp(start)
            );
            assert_eq!(
                resource.get(&FieldName::EndDateTime).unwrap(),
                FieldValue::Timestamp(end)
            );
        }

        #[test]
        fn date_time_write_clears_date() {
            let mut resource = Resource::new();
            resource.set_named("startDate", date(2024, 3, 1)).unwrap();
            resource
                .set_named("startDateTime", rfc3339("2024-03-01T09:00:00Z"))
                .unwrap();

            assert_eq!(resource.get_named("startDate").unwrap(), FieldValue::Null);
            assert!(!resource.is_all_day_event());
        }

        #[test]
        fn date_write_clears_date_time() {
            let mut resource = Resource::new();
            resource
                .set_named("startDateTime", rfc3339("2024-03-01T09:00:00Z"))
                .unwrap();
            resource.set_named("startDate", date(2024, 3, 1)).unwrap();

            assert_eq!(resource.get_named("startDateTime").unwrap(), FieldValue::Null);
            assert!(resource.is_all_day_event());
        }

        #[test]
        fn assignment_attaches_zone_and_drops_old_side() {
            let mut resource = hydrated(json!({
                "start": {"dateTime": "2024-03-01T09:00:00Z", "timeZone": "UTC", "x": 1}
            }))
            .with_time_zone(Tz::America__Chicago);
            resource.set_named("startDate", "2024-03-04").unwrap();

            let start = resource.start().unwrap();
            assert_eq!(start.value, EventTimeValue::Date("2024-03-04".to_string()));
            assert_eq!(start.time_zone.as_deref(), Some("America/Chicago"));
            assert!(start.extra.is_empty());
        }

        #[test]
        fn date_into_date_time_field_uses_local_midnight() {
            let mut resource = Resource::new().with_time_zone(Tz::Asia__Tokyo);
            resource.set(FieldName::EndDateTime, date(2024, 5, 5)).unwrap();
            assert_eq!(
                resource.end().unwrap().value,
                EventTimeValue::DateTime("2024-05-05T00:00:00+09:00".to_string())
            );
        }

        #[test]
        fn hydrated_date_uses_side_zone() {
            let resource = hydrated(json!({
                "start": {"date": "2024-01-15", "timeZone": "America/New_York"}
            }));
            let start = resource.get(&FieldName::StartDate).unwrap();
            assert_eq!(
                time::format_date_time(&start.as_timestamp().unwrap()),
                "2024-01-15T00:00:00-05:00"
            );
        }

        #[test]
        fn malformed_wire_date_is_a_format_error() {
            let resource = hydrated(json!({"start": {"date": "15/01/2024"}}));
            let err = resource.get(&FieldName::StartDate).unwrap_err();
            assert!(err.is_format_error());
            assert!(resource.sort_date().is_err());
        }

        #[test]
        fn malformed_text_assignment_is_rejected() {
            let mut resource = Resource::new();
            let err = resource
                .set(FieldName::StartDateTime, "tomorrow at nine")
                .unwrap_err();
            assert!(err.is_format_error());
            assert!(resource.wire().start.is_none());
        }

        #[test]
        fn json_assignment_is_rejected() {
            let mut resource = Resource::new();
            let err = resource.set(FieldName::EndDate, json!([1, 2])).unwrap_err();
            assert!(err.is_format_error());
        }

        #[test]
        fn side_with_both_keys_is_timed_and_round_trips() {
            let resource = hydrated(json!({
                "start": {"date": "2024-01-15", "dateTime": "2024-01-10T08:00:00Z"}
            }));
            assert!(!resource.is_all_day_event());
            assert_eq!(
                resource.get(&FieldName::StartDateTime).unwrap(),
                FieldValue::Timestamp(rfc3339("2024-01-10T08:00:00Z"))
            );
            assert_eq!(
                resource.get(&FieldName::StartDate).unwrap(),
                FieldValue::Timestamp(rfc3339("2024-01-15T00:00:00Z"))
            );
            assert_eq!(resource.sort_date().unwrap(), "2024-01-15T00:00:00Z");

            let outgoing = serde_json::to_value(resource.to_wire()).unwrap();
            assert_eq!(
                outgoing["start"],
                json!({"date": "2024-01-15", "dateTime": "2024-01-10T08:00:00Z"})
            );
        }

        #[test]
        fn zoned_value_keeps_its_zone() {
            use chrono::TimeZone;

            let tokyo = Tz::Asia__Tokyo
                .with_ymd_and_hms(2024, 3, 1, 0, 30, 0)
                .unwrap();
            let mut resource = Resource::new().with_time_zone(Tz::UTC);
            resource.set(FieldName::StartDate, tokyo).unwrap();
            resource.set(FieldName::EndDateTime, tokyo).unwrap();

            let start = resource.start().unwrap();
            assert_eq!(start.value, EventTimeValue::Date("2024-03-01".to_string()));
            assert_eq!(start.time_zone.as_deref(), Some("Asia/Tokyo"));
            assert_eq!(
                time::format_date_time(
                    &resource.get(&FieldName::StartDate).unwrap().as_timestamp().unwrap()
                ),
                "2024-03-01T00:00:00+09:00"
            );

            let end = resource.end().unwrap();
            assert_eq!(
                end.value,
                EventTimeValue::DateTime("2024-03-01T00:30:00+09:00".to_string())
            );
            assert_eq!(end.time_zone.as_deref(), Some("Asia/Tokyo"));
        }

        #[test]
        fn null_removes_side() {
            let mut resource = Resource::new();
            resource.set(FieldName::EndDate, date(2024, 1, 1)).unwrap();
            resource.set(FieldName::EndDate, FieldValue::Null).unwrap();
            assert!(resource.wire().end.is_none());
        }
    }

    mod sort_key {
        use super::*;

        #[test]
        fn prefers_start_date() {
            let resource = hydrated(json!({
                "start": {"date": "2024-01-15", "dateTime": "2024-01-10T08:00:00Z"}
            }));
            assert_eq!(resource.sort_date().unwrap(), "2024-01-15T00:00:00Z");
        }

        #[test]
        fn falls_back_to_start_date_time() {
            let resource = hydrated(json!({
                "start": {"dateTime": "2024-01-10T08:00:00-03:00"}
            }));
            assert_eq!(resource.sort_date().unwrap(), "2024-01-10T11:00:00Z");
            assert_eq!(
                resource.get(&FieldName::SortDate).unwrap(),
                FieldValue::Text("2024-01-10T11:00:00Z".to_string())
            );
        }

        #[test]
        fn empty_without_start() {
            let resource = hydrated(json!({"end": {"date": "2024-01-15"}}));
            assert_eq!(resource.sort_date().unwrap(), "");
        }

        #[test]
        fn is_read_only() {
            let mut resource = Resource::new();
            assert_eq!(
                resource.set_named("sortDate", "2024-01-01"),
                Err(RecordError::ReadOnlyField("sortDate".to_string()))
            );
        }
    }

    mod plain_fields {
        use super::*;

        #[test]
        fn name_is_stored_as_summary() {
            let mut resource = Resource::new();
            resource.set_named("name", "Standup").unwrap();
            assert_eq!(resource.wire().summary.as_deref(), Some("Standup"));
            assert_eq!(
                resource.get_named("summary").unwrap(),
                FieldValue::Text("Standup".to_string())
            );
        }

        #[test]
        fn description_can_be_cleared() {
            let mut resource = hydrated(json!({"description": "old"}));
            resource.set(FieldName::Description, FieldValue::Null).unwrap();
            assert_eq!(resource.description(), None);
        }

        #[test]
        fn unaliased_paths_pass_through() {
            let resource = hydrated(json!({
                "location": "Room 4",
                "start": {"date": "2024-01-15", "timeZone": "Europe/Oslo"},
                "reminders": {"overrides": [{"method": "popup", "minutes": 10}]}
            }));
            assert_eq!(
                resource.get_named("location").unwrap(),
                FieldValue::Text("Room 4".to_string())
            );
            assert_eq!(
                resource.get_named("start.timeZone").unwrap(),
                FieldValue::Text("Europe/Oslo".to_string())
            );
            assert_eq!(
                resource.get_named("reminders.overrides.0.minutes").unwrap(),
                FieldValue::Json(json!(10))
            );
            assert_eq!(resource.get_named("colorId").unwrap(), FieldValue::Null);
        }

        #[test]
        fn nested_raw_write_creates_containers() {
            let mut resource = Resource::new();
            resource
                .set_named("extendedProperties.private.ticket", "OPS-12")
                .unwrap();
            assert_eq!(
                resource.wire().extra.get("extendedProperties"),
                Some(&json!({"private": {"ticket": "OPS-12"}}))
            );
        }

        #[test]
        fn raw_write_into_typed_side() {
            let mut resource = Resource::new();
            resource.set_named("startDate", date(2024, 6, 1)).unwrap();
            resource.set_named("start.timeZone", "Europe/Berlin").unwrap();
            assert_eq!(
                resource.wire().start.as_ref().unwrap().time_zone.as_deref(),
                Some("Europe/Berlin")
            );
        }

        #[test]
        fn raw_write_producing_invalid_document_fails() {
            let mut resource = Resource::new();
            let err = resource.set_named("end.timeZone", "UTC").unwrap_err();
            assert!(err.is_format_error());
            assert!(resource.wire().end.is_none());
        }

        #[test]
        fn raw_write_through_scalar_is_rejected() {
            let mut resource = Resource::new();
            resource.set(FieldName::Name, "Standup").unwrap();
            let err = resource.set_named("summary.x", "y").unwrap_err();
            assert!(err.is_format_error());
            assert_eq!(resource.name(), Some("Standup"));
        }

        #[test]
        fn empty_path_reads_null_and_rejects_writes() {
            let mut resource = Resource::new();
            assert_eq!(resource.get_named("").unwrap(), FieldValue::Null);
            assert!(resource.set_named("", "x").is_err());
        }
    }

    mod attendees {
        use super::*;

        #[test]
        fn queued_attendees_replace_wire_list_on_flush() {
            let mut resource = hydrated(json!({
                "id": "evt-1",
                "attendees": [{"email": "old@example.com"}]
            }));
            resource.add_attendee(Attendee::new("ada@example.com"));
            resource.add_attendee(
                Attendee::new("bob@example.com").with_response_status(ResponseStatus::Accepted),
            );

            let body = resource.to_wire();
            let emails: Vec<_> = body
                .attendees
                .unwrap()
                .into_iter()
                .map(|a| a.email)
                .collect();
            assert_eq!(emails, ["ada@example.com", "bob@example.com"]);
            // Flushing does not touch the held document.
            assert_eq!(resource.wire().attendees.as_ref().unwrap().len(), 1);
        }
    }
}
