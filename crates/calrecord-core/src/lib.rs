//! Calendar event resource mapping.
//!
//! This crate holds the local side of a remote calendar event:
//!
//! - [`WireEvent`] - The event document exchanged with a store
//! - [`FieldName`] / [`FieldValue`] - Typed access to event fields, with the
//!   friendly-name alias table
//! - [`Resource`] - The mapper: field reads and writes, date conversion,
//!   existence, all-day detection and the sort key
//! - [`RecordError`] - Errors raised while mapping
//!
//! # Example
//!
//! ```ignore
//! use calrecord_core::{Attendee, FieldName, Resource};
//!
//! let mut standup = Resource::new().with_time_zone(chrono_tz::Europe::Paris);
//! standup.set(FieldName::Name, "Standup")?;
//! standup.set_named("startDateTime", "2024-03-01T09:00:00+01:00")?;
//! standup.add_attendee(Attendee::new("ada@example.com"));
//! assert!(!standup.is_all_day_event());
//! ```

pub mod error;
pub mod field;
pub mod resource;
pub mod time;
pub mod tracing;
pub mod wire;

pub use error::{RecordError, RecordResult};
pub use field::{DateKind, EventSide, FieldName, FieldValue, resolve_alias};
pub use resource::Resource;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use wire::{Attendee, EventTimeValue, ResponseStatus, WireEvent, WireEventTime};
