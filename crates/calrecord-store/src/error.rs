//! Error types for remote store operations.
//!
//! [`StoreError`] is what a [`RemoteStore`](crate::RemoteStore) returns.
//! [`CalendarError`] is what the repository returns: a store failure, a
//! field mapping failure, or a calendar that could not be resolved.

use std::fmt;

use calrecord_core::RecordError;
use thiserror::Error;

use crate::config::ConfigError;

/// The category of a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorCode {
    /// The event or calendar does not exist.
    NotFound,
    /// Credentials are missing, invalid or expired.
    AuthenticationFailed,
    /// The caller may not access this calendar.
    AuthorizationFailed,
    /// Connection failed, timed out, DNS resolution failed, etc.
    NetworkError,
    /// Too many requests.
    RateLimited,
    /// The store answered with a 5xx status.
    ServerError,
    /// The store answered with something that does not parse.
    InvalidResponse,
    /// The request was rejected as malformed.
    BadRequest,
    /// The write clashes with existing state (e.g. duplicate id).
    Conflict,
    /// Unexpected state inside the store implementation.
    InternalError,
}

impl StoreErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error returned by a remote store.
#[derive(Debug, Error)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    calendar_id: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Creates a new store error with the given code and message.
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            calendar_id: None,
            source: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NotFound, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::AuthenticationFailed, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NetworkError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::InvalidResponse, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::BadRequest, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Conflict, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::InternalError, message)
    }

    /// Sets the calendar this error occurred on.
    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the calendar, if set.
    pub fn calendar_id(&self) -> Option<&str> {
        self.calendar_id.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Returns a copy without the source chain.
    pub(crate) fn detached(&self) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            calendar_id: self.calendar_id.clone(),
            source: None,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref calendar_id) = self.calendar_id {
            write!(f, "[{}] ", calendar_id)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the event repository.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// No calendar id was given and none is configured.
    #[error("no calendar id given and no default calendar configured")]
    UnboundCalendar,

    /// A field failed to map (bad date literal, unknown zone, ...).
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The remote store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CalendarError {
    /// Returns true if the store reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.code() == StoreErrorCode::NotFound)
    }

    /// Returns true if a field value failed to parse.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Record(err) if err.is_format_error())
    }

    /// Returns the store error code, if this is a store failure.
    pub fn store_code(&self) -> Option<StoreErrorCode> {
        match self {
            Self::Store(err) => Some(err.code()),
            _ => None,
        }
    }
}

/// A specialized Result type for repository operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
