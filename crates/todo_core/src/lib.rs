//! Task derivation core for the todo app.
//! This crate is the single source of truth for notification, filter, sort
//! and tag rules applied to a fetched task list.

pub mod config;
pub mod derive;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod time;

pub use config::preferences::{
    InMemoryPreferenceStore, JsonFilePreferenceStore, NotificationPreferences, PreferenceError,
    PreferenceStore,
};
pub use derive::filter::{filter_task_refs, filter_tasks, FilterState, StatusFilter};
pub use derive::notifications::{
    count_notifications, filter_notifications_by_kind, generate_notifications,
    group_notifications_by_kind, NotificationGroup, NotificationPolicy,
    DEFAULT_UPCOMING_WINDOW_DAYS, EXTENDED_UPCOMING_WINDOW_DAYS,
};
pub use derive::sort::{sort_tasks, sorted_tasks, SortKey, SortOrder, TaskSort};
pub use derive::tags::{extract_unique_tags, tag_counts};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::notification::{
    parse_notification_kind, Notification, NotificationKind, ALL_NOTIFICATION_KINDS,
};
pub use model::task::{
    decode_tasks, decode_tasks_json, parse_priority, DecodedTasks, Priority, RawTask,
    RejectedTask, Task, TaskId, TaskValidationError,
};
pub use service::dashboard_service::{DashboardSnapshot, TaskDashboardService};
pub use store::http::{AuthTokenProvider, HttpTaskSource, StaticToken};
pub use store::source::{InMemoryTaskSource, StoreError, StoreResult, TaskQuery, TaskSource};
pub use time::classifier::{DateClassifier, DayRelation, ToCalendarDay};
pub use time::clock::{Clock, FixedClock, SystemClock};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
