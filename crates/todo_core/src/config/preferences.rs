//! Notification preferences and their stores.
//!
//! # Responsibility
//! - Define the user-tunable notification preference document.
//! - Provide injectable stores so no layer reads ambient storage.
//!
//! # Invariants
//! - Missing fields take defaults; a missing file means defaults.
//! - Saved documents always pass `validate()`.

use crate::derive::notifications::{NotificationPolicy, DEFAULT_UPCOMING_WINDOW_DAYS};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const MAX_UPCOMING_WINDOW_DAYS: u32 = 365;

/// Notification preference document (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub enable_smart_grouping: bool,
    pub enable_animations: bool,
    pub enable_batch_operations: bool,
    pub enable_filters: bool,
    pub enable_search: bool,
    pub enable_timeline_view: bool,
    pub enable_snooze: bool,
    /// Minutes.
    pub default_snooze_duration: u32,
    pub show_unread_badge: bool,
    pub auto_archive_after_days: u32,
    pub upcoming_window_days: u32,
    pub remind_completed_recurring: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enable_smart_grouping: true,
            enable_animations: true,
            enable_batch_operations: true,
            enable_filters: true,
            enable_search: true,
            enable_timeline_view: true,
            enable_snooze: true,
            default_snooze_duration: 60,
            show_unread_badge: true,
            auto_archive_after_days: 30,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            remind_completed_recurring: false,
        }
    }
}

impl NotificationPreferences {
    /// Derivation policy carried by these preferences.
    pub fn policy(&self) -> NotificationPolicy {
        NotificationPolicy {
            upcoming_window_days: self.upcoming_window_days,
            remind_completed_recurring: self.remind_completed_recurring,
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.upcoming_window_days > MAX_UPCOMING_WINDOW_DAYS {
            return Err(PreferenceError::Invalid(format!(
                "upcomingWindowDays must be <= {MAX_UPCOMING_WINDOW_DAYS}, got {}",
                self.upcoming_window_days
            )));
        }
        if self.default_snooze_duration == 0 {
            return Err(PreferenceError::Invalid(
                "defaultSnoozeDuration must be > 0".to_string(),
            ));
        }
        if self.auto_archive_after_days == 0 {
            return Err(PreferenceError::Invalid(
                "autoArchiveAfterDays must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Preference load/save errors.
#[derive(Debug)]
pub enum PreferenceError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "preference file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid preference document: {err}"),
            Self::Invalid(message) => write!(f, "invalid preference value: {message}"),
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Storage contract for notification preferences.
pub trait PreferenceStore {
    fn load(&self) -> Result<NotificationPreferences, PreferenceError>;
    fn save(&mut self, preferences: &NotificationPreferences) -> Result<(), PreferenceError>;

    /// Loads preferences, falling back to defaults on any error.
    fn load_or_default(&self) -> NotificationPreferences {
        match self.load() {
            Ok(preferences) => preferences,
            Err(err) => {
                warn!("event=preferences_load module=config status=error fallback=defaults error={err}");
                NotificationPreferences::default()
            }
        }
    }

    /// Applies `change` to the stored document and saves the result.
    ///
    /// A document that cannot be loaded is reported, not overwritten.
    fn update<F>(&mut self, change: F) -> Result<NotificationPreferences, PreferenceError>
    where
        F: FnOnce(&mut NotificationPreferences),
        Self: Sized,
    {
        let mut preferences = self.load()?;
        change(&mut preferences);
        self.save(&preferences)?;
        Ok(preferences)
    }

    /// Restores and saves defaults.
    fn reset(&mut self) -> Result<(), PreferenceError> {
        self.save(&NotificationPreferences::default())
    }
}

/// Process-local store, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    current: Option<NotificationPreferences>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn load(&self) -> Result<NotificationPreferences, PreferenceError> {
        Ok(self.current.clone().unwrap_or_default())
    }

    fn save(&mut self, preferences: &NotificationPreferences) -> Result<(), PreferenceError> {
        preferences.validate()?;
        self.current = Some(preferences.clone());
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Result<NotificationPreferences, PreferenceError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(NotificationPreferences::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };
        let preferences: NotificationPreferences = serde_json::from_str(&text)?;
        preferences.validate()?;
        Ok(preferences)
    }

    fn save(&mut self, preferences: &NotificationPreferences) -> Result<(), PreferenceError> {
        preferences.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let text = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, text).map_err(|err| self.io_error(err))?;
        info!("event=preferences_saved module=config status=ok");
        Ok(())
    }
}
