//! Calendar settings.
//!
//! Settings live in `<config_dir>/calrecord/config.toml`:
//!
//! ```toml
//! default_calendar_id = "team@example.com"
//! timezone = "Europe/Paris"
//! ```
//!
//! Both keys are optional. The values are handed to
//! [`CalendarResolver::new`](crate::CalendarResolver::new); nothing in this
//! crate reads configuration behind the caller's back.

use std::path::{Path, PathBuf};

use calrecord_core::time::parse_time_zone;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `default_calendar_id`.
pub const CALENDAR_ID_ENV: &str = "CALRECORD_CALENDAR_ID";
/// Environment variable overriding `timezone`.
pub const TIMEZONE_ENV: &str = "CALRECORD_TIMEZONE";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid timezone '{0}' in config")]
    InvalidTimezone(String),
}

/// Settings for resolving calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Calendar used when an operation names none.
    pub default_calendar_id: Option<String>,
    /// IANA zone for new date values.
    pub timezone: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            default_calendar_id: None,
            timezone: "UTC".to_string(),
        }
    }
}

impl CalendarSettings {
    /// Builder method to set the default calendar.
    pub fn with_default_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.default_calendar_id = Some(calendar_id.into());
        self
    }

    /// Builder method to set the timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Loads settings from the default path, or defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calrecord")
            .join("config.toml")
    }

    /// Applies `CALRECORD_CALENDAR_ID` and `CALRECORD_TIMEZONE` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(CALENDAR_ID_ENV).ok(),
            std::env::var(TIMEZONE_ENV).ok(),
        )
    }

    fn with_overrides(mut self, calendar_id: Option<String>, timezone: Option<String>) -> Self {
        if let Some(calendar_id) = calendar_id.filter(|v| !v.is_empty()) {
            self.default_calendar_id = Some(calendar_id);
        }
        if let Some(timezone) = timezone.filter(|v| !v.is_empty()) {
            self.timezone = timezone;
        }
        self
    }

    /// Parses the configured timezone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        parse_time_zone(&self.timezone)
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let settings = CalendarSettings::default();
        assert_eq!(settings.default_calendar_id, None);
        assert_eq!(settings.timezone().unwrap(), Tz::UTC);
    }

    #[test]
    fn load_from_file() {
        let file = write_config(
            r#"
default_calendar_id = "team@example.com"
timezone = "Europe/Paris"
"#,
        );
        let settings = CalendarSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.default_calendar_id.as_deref(), Some("team@example.com"));
        assert_eq!(settings.timezone().unwrap(), Tz::Europe__Paris);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let file = write_config("default_calendar_id = \"primary\"\n");
        let settings = CalendarSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.timezone, "UTC");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("timezone = [");
        let err = CalendarSettings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CalendarSettings::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let settings = CalendarSettings::default().with_timezone("Mars/Olympus_Mons");
        assert!(matches!(
            settings.timezone(),
            Err(ConfigError::InvalidTimezone(name)) if name == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let settings = CalendarSettings::default()
            .with_default_calendar("from-file")
            .with_overrides(Some("from-env".to_string()), Some("Asia/Tokyo".to_string()));
        assert_eq!(settings.default_calendar_id.as_deref(), Some("from-env"));
        assert_eq!(settings.timezone, "Asia/Tokyo");
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let settings = CalendarSettings::default()
            .with_default_calendar("from-file")
            .with_overrides(Some(String::new()), None);
        assert_eq!(settings.default_calendar_id.as_deref(), Some("from-file"));
        assert_eq!(settings.timezone, "UTC");
    }

    #[test]
    fn default_path_ends_with_config_file() {
        let path = CalendarSettings::default_path();
        assert!(path.ends_with("calrecord/config.toml"));
    }
}
