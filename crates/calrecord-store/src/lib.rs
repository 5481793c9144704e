//! Event persistence for calrecord.
//!
//! This crate connects [`calrecord_core::Resource`] to remote calendars:
//!
//! - [`RemoteStore`]: one calendar's list/get/insert/update/delete calls
//! - [`StoreConnector`] and [`CalendarResolver`]: pick the calendar an
//!   operation targets, falling back to the configured default
//! - [`EventRepository`]: `list`, `find`, `create`, `save` and `delete`
//! - [`MemoryBackend`]: an in-process store
//!
//! ```ignore
//! let settings = CalendarSettings::load()?.with_env_overrides();
//! let resolver = CalendarResolver::new(settings, Arc::new(MemoryBackend::new()))?;
//! let events = EventRepository::new(resolver);
//!
//! let standup = events
//!     .create([("name", FieldValue::from("Standup")), ("startDateTime", start.into())], None)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod repository;
pub mod resolver;
pub mod store;

pub use config::{CalendarSettings, ConfigError};
pub use error::{CalendarError, CalendarResult, StoreError, StoreErrorCode, StoreResult};
pub use memory::{MemoryBackend, MemoryStore};
pub use repository::{EventRepository, SaveMethod};
pub use resolver::CalendarResolver;
pub use store::{BoxFuture, ErrorStore, ListQuery, RemoteStore, StoreConnector};
