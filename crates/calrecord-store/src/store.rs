//! RemoteStore trait definition.
//!
//! A [`RemoteStore`] is a handle on one remote calendar. It speaks wire
//! documents only; mapping them to [`Resource`](calrecord_core::Resource)
//! values is the repository's job.
//!
//! Each method performs one round trip. Retries, timeouts and pagination
//! belong to the implementation.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use calrecord_core::WireEvent;
use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};

/// A boxed future for async trait methods.
///
/// Keeps [`RemoteStore`] object-safe so the resolver can hand out
/// `Arc<dyn RemoteStore>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Lower bound on the event start.
    pub time_min: Option<DateTime<Utc>>,
    /// Upper bound on the event start.
    pub time_max: Option<DateTime<Utc>>,
    /// Store-specific parameters passed through untouched (`q`, `maxResults`, ...).
    pub params: BTreeMap<String, String>,
}

impl ListQuery {
    /// Creates an unbounded query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the lower bound.
    pub fn with_time_min(mut self, time_min: DateTime<Utc>) -> Self {
        self.time_min = Some(time_min);
        self
    }

    /// Builder method to set the upper bound.
    pub fn with_time_max(mut self, time_max: DateTime<Utc>) -> Self {
        self.time_max = Some(time_max);
        self
    }

    /// Builder method to set both bounds.
    pub fn with_range(self, time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> Self {
        self.with_time_min(time_min).with_time_max(time_max)
    }

    /// Builder method to add a passthrough parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns a passthrough parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// A handle on one remote calendar.
///
/// ```ignore
/// struct HttpStore {
///     client: reqwest::Client,
///     calendar_id: String,
/// }
///
/// impl RemoteStore for HttpStore {
///     fn calendar_id(&self) -> &str { &self.calendar_id }
///
///     fn get_event<'a>(&'a self, event_id: &'a str) -> BoxFuture<'a, StoreResult<WireEvent>> {
///         Box::pin(async move {
///             let url = format!("{BASE}/calendars/{}/events/{event_id}", self.calendar_id);
///             // ...
///         })
///     }
///     // ... other methods
/// }
/// ```
pub trait RemoteStore: Send + Sync {
    /// Returns the identifier of the calendar this handle is bound to.
    fn calendar_id(&self) -> &str;

    /// Lists events matching `query`, in store order.
    fn list_events(&self, query: ListQuery) -> BoxFuture<'_, StoreResult<Vec<WireEvent>>>;

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if no event has this id.
    fn get_event<'a>(&'a self, event_id: &'a str) -> BoxFuture<'a, StoreResult<WireEvent>>;

    /// Creates an event and returns the stored document.
    fn insert_event<'a>(&'a self, event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>>;

    /// Replaces the event with `event.id` and returns the stored document.
    fn update_event<'a>(&'a self, event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>>;

    /// Deletes an event.
    fn delete_event<'a>(&'a self, event_id: &'a str) -> BoxFuture<'a, StoreResult<()>>;
}

/// Opens [`RemoteStore`] handles by calendar id.
pub trait StoreConnector: Send + Sync {
    /// Returns a handle bound to `calendar_id`.
    fn connect(&self, calendar_id: &str) -> StoreResult<Arc<dyn RemoteStore>>;
}

/// A store that always returns an error.
///
/// Stands in for a backend that failed to initialize.
#[derive(Debug)]
pub struct ErrorStore {
    calendar_id: String,
    error: StoreError,
}

impl ErrorStore {
    /// Creates a new error store.
    pub fn new(calendar_id: impl Into<String>, error: StoreError) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            error,
        }
    }

    fn fail<'a, T: Send + 'a>(&self) -> BoxFuture<'a, StoreResult<T>> {
        let error = self.error.detached().with_calendar(&self.calendar_id);
        Box::pin(async move { Err(error) })
    }
}

impl RemoteStore for ErrorStore {
    fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    fn list_events(&self, _query: ListQuery) -> BoxFuture<'_, StoreResult<Vec<WireEvent>>> {
        self.fail()
    }

    fn get_event<'a>(&'a self, _event_id: &'a str) -> BoxFuture<'a, StoreResult<WireEvent>> {
        self.fail()
    }

    fn insert_event<'a>(&'a self, _event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>> {
        self.fail()
    }

    fn update_event<'a>(&'a self, _event: &'a WireEvent) -> BoxFuture<'a, StoreResult<WireEvent>> {
        self.fail()
    }

    fn delete_event<'a>(&'a self, _event_id: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        self.fail()
    }
}

impl StoreConnector for ErrorStore {
    fn connect(&self, calendar_id: &str) -> StoreResult<Arc<dyn RemoteStore>> {
        Ok(Arc::new(ErrorStore::new(calendar_id, self.error.detached())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use chrono::TimeZone;

    #[test]
    fn list_query_builder() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let query = ListQuery::new()
            .with_range(from, to)
            .with_param("q", "standup")
            .with_param("maxResults", "10");

        assert_eq!(query.time_min, Some(from));
        assert_eq!(query.time_max, Some(to));
        assert_eq!(query.param("q"), Some("standup"));
        assert_eq!(query.param("singleEvents"), None);
    }

    #[tokio::test]
    async fn error_store_returns_error() {
        let store = ErrorStore::new("team", StoreError::authentication("token expired"));
        assert_eq!(store.calendar_id(), "team");

        let err = store.list_events(ListQuery::new()).await.unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::AuthenticationFailed);
        assert_eq!(err.to_string(), "[team] authentication_failed: token expired");

        let err = store.delete_event("evt-1").await.unwrap_err();
        assert_eq!(err.message(), "token expired");
    }

    #[tokio::test]
    async fn error_connector_binds_requested_calendar() {
        let connector = ErrorStore::new("unused", StoreError::network("offline"));
        let store = connector.connect("ops").unwrap();
        assert_eq!(store.calendar_id(), "ops");
        let err = store.get_event("evt-1").await.unwrap_err();
        assert_eq!(err.calendar_id(), Some("ops"));
        assert!(err.is_retryable());
    }
}
