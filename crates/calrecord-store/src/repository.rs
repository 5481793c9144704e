//! Persistence verbs for event resources.
//!
//! [`EventRepository`] is the only place a [`Resource`] meets a
//! [`RemoteStore`](crate::RemoteStore). Every method resolves the target
//! calendar, performs one store call and wraps what comes back.

use calrecord_core::{FieldName, FieldValue, Resource};
use tracing::{debug, info};

use crate::error::CalendarResult;
use crate::resolver::CalendarResolver;
use crate::store::ListQuery;

/// How `save` persists a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    /// Insert a new event.
    Create,
    /// Replace the event with the resource's id.
    Update,
}

impl SaveMethod {
    /// Returns `Update` for resources that exist remotely, else `Create`.
    pub fn for_resource(resource: &Resource) -> Self {
        if resource.exists() {
            Self::Update
        } else {
            Self::Create
        }
    }

    /// Returns the verb as logged, `create` or `update`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Lists, fetches, creates, saves and deletes event resources.
#[derive(Debug, Clone)]
pub struct EventRepository {
    resolver: CalendarResolver,
}

impl EventRepository {
    /// Creates a repository backed by `resolver`.
    pub fn new(resolver: CalendarResolver) -> Self {
        Self { resolver }
    }

    /// Returns the resolver.
    pub fn resolver(&self) -> &CalendarResolver {
        &self.resolver
    }

    /// Lists events, ordered ascending by sort key.
    ///
    /// Events with equal keys keep the order the store returned them in.
    ///
    /// # Errors
    ///
    /// Fails if the calendar cannot be resolved, the store call fails, or
    /// a returned event carries an unparseable start.
    pub async fn list(
        &self,
        query: ListQuery,
        calendar_id: Option<&str>,
    ) -> CalendarResult<Vec<Resource>> {
        let store = self.resolver.resolve(calendar_id)?;
        let documents = store.list_events(query).await?;

        let mut keyed = documents
            .into_iter()
            .map(|doc| -> CalendarResult<(String, Resource)> {
                let resource = Resource::from_remote(doc, store.calendar_id())
                    .with_time_zone(self.resolver.time_zone());
                Ok((resource.sort_date()?, resource))
            })
            .collect::<CalendarResult<Vec<_>>>()?;
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

        debug!(
            calendar_id = store.calendar_id(),
            count = keyed.len(),
            "listed resources"
        );
        Ok(keyed.into_iter().map(|(_, resource)| resource).collect())
    }

    /// Fetches one event.
    pub async fn find(&self, event_id: &str, calendar_id: Option<&str>) -> CalendarResult<Resource> {
        let store = self.resolver.resolve(calendar_id)?;
        let document = store.get_event(event_id).await?;
        Ok(Resource::from_remote(document, store.calendar_id())
            .with_time_zone(self.resolver.time_zone()))
    }

    /// Builds a resource from `fields` and inserts it.
    ///
    /// Fields are applied in order through [`Resource::set`], so a later
    /// date field replaces an earlier one on the same side.
    ///
    /// ```ignore
    /// let event = repository
    ///     .create(
    ///         [("name", FieldValue::from("Standup")), ("startDateTime", start.into())],
    ///         None,
    ///     )
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Fails before any store call if the calendar cannot be resolved or a
    /// field value does not convert.
    pub async fn create<I, F, V>(&self, fields: I, calendar_id: Option<&str>) -> CalendarResult<Resource>
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<FieldName>,
        V: Into<FieldValue>,
    {
        let calendar_id = self.resolver.calendar_id_for(calendar_id)?;
        let mut resource = Resource::new()
            .with_calendar_id(calendar_id)
            .with_time_zone(self.resolver.time_zone());
        for (field, value) in fields {
            resource.set(field.into(), value)?;
        }
        self.save(&resource, Some(SaveMethod::Create)).await
    }

    /// Persists a resource and returns the stored version.
    ///
    /// `method` overrides the verb otherwise picked by
    /// [`SaveMethod::for_resource`]. Queued attendees replace the remote
    /// attendee list. `resource` is left untouched.
    pub async fn save(
        &self,
        resource: &Resource,
        method: Option<SaveMethod>,
    ) -> CalendarResult<Resource> {
        let method = method.unwrap_or_else(|| SaveMethod::for_resource(resource));
        let store = self.resolver.resolve(resource.calendar_id())?;
        let body = resource.to_wire();

        let stored = match method {
            SaveMethod::Create => store.insert_event(&body).await?,
            SaveMethod::Update => store.update_event(&body).await?,
        };
        info!(
            calendar_id = store.calendar_id(),
            event_id = %stored.id,
            method = method.as_str(),
            "saved event"
        );
        Ok(Resource::from_remote(stored, store.calendar_id()).with_time_zone(resource.time_zone()))
    }

    /// Deletes an event.
    ///
    /// Deletes `event_id` if given, else the resource's own id. The resource
    /// is consumed.
    pub async fn delete(&self, resource: Resource, event_id: Option<&str>) -> CalendarResult<()> {
        let store = self.resolver.resolve(resource.calendar_id())?;
        let event_id = event_id.unwrap_or(resource.id());
        store.delete_event(event_id).await?;
        info!(calendar_id = store.calendar_id(), event_id, "deleted event");
        Ok(())
    }
}
