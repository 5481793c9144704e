//! In-process [`RemoteStore`] implementation.
//!
//! [`MemoryBackend`] holds every calendar's events behind one lock and acts
//! as the [`StoreConnector`]; [`MemoryStore`] is the per-calendar handle it
//! hands out. Writes behave like a hosted calendar service: inserts get a
//! server-assigned id and bookkeeping fields, sides without a zone get the
//! calendar zone, and unknown ids are `NotFound`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use calrecord_core::{EventSide, WireEvent, WireEventTime};
use chrono::{SecondsFormat, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{BoxFuture, ListQuery, RemoteStore, StoreConnector};

type Calendars = HashMap<String, Vec<WireEvent>>;

/// Shared storage for any number of in-memory calendars.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    calendars: Arc<RwLock<Calendars>>,
    time_zone: Tz,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Creates an empty backend whose calendars are in UTC.
    pub fn new() -> Self {
        Self {
            calendars: Arc::default(),
            time_zone: Tz::UTC,
        }
    }

    /// Builder method to set the calendar zone stamped on new events.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Returns a handle on one calendar.
    pub fn store(&self, calendar_id: impl Into<String>) -> MemoryStore {
        MemoryStore {
            calendar_id: calendar_id.into(),
            backend: self.clone(),
        }
    }

    /// Appends documents to a calendar as-is.
    ///
    /// Documents without an id get one assigned.
    pub fn seed(
        &self,
        calendar_id: &str,
        events: impl IntoIterator<Item = WireEvent>,
    ) -> StoreResult<()> {
        let mut calendars = self.write()?;
        let stored = calendars.entry(calendar_id.to_string()).or_default();
        for mut event in events {
            if event.id.is_empty() {
                event.id = new_event_id();
            }
            stored.push(event);
        }
        Ok(())
    }

    /// Returns a snapshot of a calendar's documents in insertion order.
    pub fn events(&self, calendar_id: &str) -> StoreResult<Vec<WireEvent>> {
        Ok(self
            .read()?
            .get(calendar_id)
            .cloned()
            .unwrap_or_default())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Calendars>> {
        self.calendars.read().map_err(poisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Calendars>> {
        self.calendars.write().map_err(poisoned)
    }
}

impl StoreConnector for MemoryBackend {
    fn connect(&self, calendar_id: &str) -> StoreResult<Arc<dyn RemoteStore>> {
        Ok(Arc::new(self.store(calendar_id)))
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::internal("memory store lock poisoned")
}

fn new_event_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A handle on one calendar of a [`MemoryBackend`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    calendar_id: String,
    backend: MemoryBackend,
}

impl MemoryStore {
    fn list(&self, query: &ListQuery) -> StoreResult<Vec<WireEvent>> {
        let limit = match query.param("maxResults") {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                StoreError::bad_request(format!("maxResults must be a positive integer, got '{raw}'"))
            })?),
            None => None,
        };
        let needle = query.param("q").map(str::to_lowercase);

        let calendars = self.backend.read()?;
        let events = calendars
            .get(&self.calendar_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|event| self.in_range(event, query))
            .filter(|event| needle.as_deref().is_none_or(|n| matches_text(event, n)))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            calendar_id = %self.calendar_id,
            count = events.len(),
            "listed events"
        );
        Ok(events)
    }

    fn in_range(&self, event: &WireEvent, query: &ListQuery) -> bool {
        if query.time_min.is_none() && query.time_max.is_none() {
            return true;
        }
        let Some(start) = event
            .start
            .as_ref()
            .and_then(|side| side.instant(EventSide::Start, self.backend.time_zone).ok())
        else {
            return false;
        };
        query.time_min.is_none_or(|min| start >= min) && query.time_max.is_none_or(|max| start <= max)
    }

    fn get(&self, event_id: &str) -> StoreResult<WireEvent> {
        self.backend
            .read()?
            .get(&self.calendar_id)
            .and_then(|events| events.iter().find(|e| e.id == event_id))
            .cloned()
            .ok_or_else(|| self.not_found(event_id))
    }

    fn insert(&self, event: &WireEvent) -> StoreResult<WireEvent> {
        let mut stored = event.clone();
        if stored.id.is_empty() {
            stored.id = new_event_id();
        }
        let now = timestamp();
        stored
            .extra
            .entry("status")
            .or_insert_with(|| Value::String("confirmed".to_string()));
        stored.extra.insert("created".to_string(), Value::String(now.clone()));
        stored.extra.insert("updated".to_string(), Value::String(now));
        self.normalize(&mut stored);

        let mut calendars = self.backend.write()?;
        let events = calendars.entry(self.calendar_id.clone()).or_default();
        if events.iter().any(|e| e.id == stored.id) {
            return Err(StoreError::conflict(format!("event {} already exists", stored.id))
                .with_calendar(&self.calendar_id));
        }
        events.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, event: &WireEvent) -> StoreResult<WireEvent> {
        if event.id.is_empty() {
            return Err(StoreError::bad_request("cannot update an event without an id")
                .with_calendar(&self.calendar_id));
        }
        let mut calendars = self.backend.write()?;
        let slot = calendars
            .get_mut(&self.calendar_id)
            .and_then(|events| events.iter_mut().find(|e| e.id == event.id))
            .ok_or_else(|| self.not_found(&event.id))?;

        let mut stored = event.clone();
        for key in ["created", "status"] {
            if let Some(previous) = slot.extra.get(key) {
                stored.extra.entry(key).or_insert_with(|| previous.clone());
            }
        }
        stored
            .extra
            .insert("updated".to_string(), Value::String(timestamp()));
        self.normalize(&mut stored);

        *slot = stored.clone();
        Ok(stored)
    }

    fn delete(&self, event_id: &str) -> StoreResult<()> {
        let mut calendars = self.backend.write()?;
        let events = calendars
            .get_mut(&self.calendar_id)
            .ok_or_else(|| self.not_found(event_id))?;
        let position = events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| self.not_found(event_id))?;
        events.remove(position);
        Ok(())
    }

    /// Fills in the calendar zone and drops an empty attendee list.
    fn normalize(&self, event: &mut WireEvent) {
        for side in [EventSide::Start, EventSide::End] {
            if let Some(time) = event.side_mut(side).as_mut() {
                stamp_zone(time, self.backend.time_zone);
            }
        }
        if event.attendees.as_ref().is_some_and(Vec::is_empty) {
            event.attendees = None;
        }
    }

    fn not_found(&self, event_id: &str) -> StoreError {
        StoreError::not_found(format!("event {event_id} does not exist"))
            .with_calendar(&self.calendar_id)
    }
}

fn stamp_zone(time: &mut WireEventTime, time_zone: Tz) {
    if time.time_zone.as_deref().is_none_or(str::is_empty) {
        time.time_zone = Some(time_zone.name().to_string());
    }
}

fn matches_text(event: &WireEvent, needle: &str) -> bool {
    [event.summary.as_deref(), event.description.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(needle))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl RemoteStore for MemoryStore {
    fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    fn list_events(&self, query: ListQuery) -> BoxFuture<'_, StoreResult<Vec<WireEvent>>> {
        Box::pin(async move { self.list(&query) })
    }

    fn get_event<'a>(&'a self, event_id: &'a str) -> BoxFuture<'a, StoreResult<WireEvent>> {
        Box::pin(async move { self.get(event_id) })
    }

    fn insert_event<'a>(&'a self, event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>> {
        Box::pin(async move { self.insert(event) })
    }

    fn update_event<'a>(&'a self, event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>> {
        Box::pin(async move { self.update(event) })
    }

    fn delete_event<'a>(&'a self, event_id: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move { self.delete(event_id) })
    }
}
