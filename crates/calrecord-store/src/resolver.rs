//! Maps an optional calendar id to a store handle.

use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use tracing::debug;

use crate::config::CalendarSettings;
use crate::error::{CalendarError, CalendarResult};
use crate::store::{RemoteStore, StoreConnector};

/// Resolves calendar ids against configured defaults.
#[derive(Clone)]
pub struct CalendarResolver {
    settings: CalendarSettings,
    time_zone: Tz,
    connector: Arc<dyn StoreConnector>,
}

impl fmt::Debug for CalendarResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarResolver")
            .field("settings", &self.settings)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}

impl CalendarResolver {
    /// Creates a resolver.
    ///
    /// # Errors
    ///
    /// Fails if the configured timezone is not a known IANA zone.
    pub fn new(settings: CalendarSettings, connector: Arc<dyn StoreConnector>) -> CalendarResult<Self> {
        let time_zone = settings.timezone()?;
        Ok(Self {
            settings,
            time_zone,
            connector,
        })
    }

    /// Returns the configured default calendar.
    pub fn default_calendar_id(&self) -> Option<&str> {
        self.settings
            .default_calendar_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// Returns the zone new and fetched resources use.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Picks `explicit` if non-empty, else the default.
    pub fn calendar_id_for<'a>(&'a self, explicit: Option<&'a str>) -> CalendarResult<&'a str> {
        explicit
            .filter(|id| !id.is_empty())
            .or_else(|| self.default_calendar_id())
            .ok_or(CalendarError::UnboundCalendar)
    }

    /// Returns a store handle for `explicit` or the default calendar.
    ///
    /// # Errors
    ///
    /// Fails with [`CalendarError::UnboundCalendar`] before contacting any
    /// store when neither is available.
    pub fn resolve(&self, explicit: Option<&str>) -> CalendarResult<Arc<dyn RemoteStore>> {
        let calendar_id = self.calendar_id_for(explicit)?;
        debug!(calendar_id, explicit = explicit.is_some(), "resolving calendar");
        Ok(self.connector.connect(calendar_id)?)
    }
}
