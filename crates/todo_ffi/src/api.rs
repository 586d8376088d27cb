//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task derivations to Dart via FRB as JSON-in, envelope-out calls.
//! - Decode loose task JSON at this boundary before any core rule runs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Malformed input yields an `ok = false` envelope, never a partial result.
//! - Invalid task records are skipped and counted in `rejected`.

use chrono::{DateTime, FixedOffset, Local};
use log::warn;
use serde_json::Value;
use todo_core::{
    core_version as core_version_inner, count_notifications, decode_tasks_json,
    extract_unique_tags, filter_tasks, generate_notifications, init_logging as init_logging_inner,
    ping as ping_inner, sort_tasks, DecodedTasks, FilterState, Notification, NotificationPolicy,
    SortKey, SortOrder, TaskSort,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Notification row for the notification center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    /// `{task_id}-{today|overdue|upcoming|recurring}`.
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    /// `due_today|overdue|upcoming_due_date|recurring_reminder`.
    pub kind: String,
    pub message: String,
    /// Raw due date text of the source task.
    pub due_date: Option<String>,
}

/// Notification derivation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationsResponse {
    pub ok: bool,
    pub items: Vec<NotificationItem>,
    pub count: u32,
    /// Task records skipped as invalid.
    pub rejected: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl NotificationsResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            count: 0,
            rejected: 0,
            message: message.into(),
        }
    }
}

/// Filtered task list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksResponse {
    pub ok: bool,
    /// JSON array of normalized tasks, `[]` on failure.
    pub tasks_json: String,
    pub count: u32,
    pub rejected: u32,
    pub message: String,
}

impl TasksResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            tasks_json: "[]".to_string(),
            count: 0,
            rejected: 0,
            message: message.into(),
        }
    }
}

/// Derives notifications for a JSON task list.
///
/// Input semantics:
/// - `tasks_json`: JSON array of backend task records.
/// - `now_rfc3339`: reference instant; `None` or blank uses the device clock.
///   Calendar days are taken in the offset of this instant.
/// - `upcoming_window_days`: inclusive look-ahead for upcoming reminders.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn derive_notifications(
    tasks_json: String,
    now_rfc3339: Option<String>,
    upcoming_window_days: u32,
    remind_completed_recurring: bool,
) -> NotificationsResponse {
    let decoded = match decode_input(&tasks_json) {
        Ok(decoded) => decoded,
        Err(message) => return NotificationsResponse::failure(message),
    };
    let now = match resolve_now(now_rfc3339.as_deref()) {
        Ok(now) => now,
        Err(message) => return NotificationsResponse::failure(message),
    };
    let policy = policy(upcoming_window_days, remind_completed_recurring);

    let items = generate_notifications(&decoded.tasks, &now, &policy)
        .into_iter()
        .map(to_notification_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No notifications.".to_string()
    } else {
        format!("{} notification(s).", items.len())
    };
    NotificationsResponse {
        ok: true,
        count: to_u32(items.len()),
        items,
        rejected: to_u32(decoded.rejected.len()),
        message,
    }
}

/// Badge number for the notification bell.
///
/// # FFI contract
/// - Same inputs as `derive_notifications`.
/// - Returns `-1` when input cannot be decoded; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_badge_count(
    tasks_json: String,
    now_rfc3339: Option<String>,
    upcoming_window_days: u32,
    remind_completed_recurring: bool,
) -> i64 {
    let Ok(decoded) = decode_input(&tasks_json) else {
        return -1;
    };
    let Ok(now) = resolve_now(now_rfc3339.as_deref()) else {
        return -1;
    };
    let policy = policy(upcoming_window_days, remind_completed_recurring);
    i64::try_from(count_notifications(&decoded.tasks, &now, &policy)).unwrap_or(i64::MAX)
}

/// Filters and optionally sorts a JSON task list.
///
/// Input semantics:
/// - `filter_json`: camelCase `FilterState` document; `None` or blank means no filter.
/// - `sort_key`: `created_at|priority|due_date`; `None` keeps filtered input order.
/// - `sort_order`: `ascending|descending` (or `asc|desc`); defaults to descending.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_tasks_json(
    tasks_json: String,
    filter_json: Option<String>,
    sort_key: Option<String>,
    sort_order: Option<String>,
) -> TasksResponse {
    let decoded = match decode_input(&tasks_json) {
        Ok(decoded) => decoded,
        Err(message) => return TasksResponse::failure(message),
    };
    let filter = match parse_filter(filter_json.as_deref()) {
        Ok(filter) => filter,
        Err(message) => return TasksResponse::failure(message),
    };
    let sort = match parse_sort(sort_key.as_deref(), sort_order.as_deref()) {
        Ok(sort) => sort,
        Err(message) => return TasksResponse::failure(message),
    };

    let mut tasks = filter_tasks(&decoded.tasks, &filter);
    if let Some(sort) = sort {
        sort_tasks(&mut tasks, sort);
    }
    match serde_json::to_string(&tasks) {
        Ok(tasks_json) => TasksResponse {
            ok: true,
            tasks_json,
            count: to_u32(tasks.len()),
            rejected: to_u32(decoded.rejected.len()),
            message: format!("{} of {} task(s).", tasks.len(), decoded.tasks.len()),
        },
        Err(err) => TasksResponse::failure(format!("filter_tasks_json failed: {err}")),
    }
}

/// Unique tags of a JSON task list in first-seen order.
///
/// # FFI contract
/// - Returns an empty list when input cannot be decoded; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn unique_tags(tasks_json: String) -> Vec<String> {
    decode_input(&tasks_json)
        .map(|decoded| extract_unique_tags(&decoded.tasks))
        .unwrap_or_default()
}

fn decode_input(tasks_json: &str) -> Result<DecodedTasks, String> {
    decode_tasks_json(tasks_json).map_err(|err| {
        warn!("event=tasks_decode module=ffi status=error reason=invalid_json");
        format!("invalid tasks_json: {err}")
    })
}

fn resolve_now(now_rfc3339: Option<&str>) -> Result<DateTime<FixedOffset>, String> {
    match now_rfc3339.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map_err(|err| format!("invalid now_rfc3339 `{value}`: {err}")),
        None => Ok(Local::now().fixed_offset()),
    }
}

fn policy(upcoming_window_days: u32, remind_completed_recurring: bool) -> NotificationPolicy {
    NotificationPolicy::default()
        .with_upcoming_window_days(upcoming_window_days)
        .with_remind_completed_recurring(remind_completed_recurring)
}

fn parse_filter(filter_json: Option<&str>) -> Result<FilterState, String> {
    match filter_json.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => {
            serde_json::from_str(value).map_err(|err| format!("invalid filter_json: {err}"))
        }
        None => Ok(FilterState::default()),
    }
}

fn parse_sort(sort_key: Option<&str>, sort_order: Option<&str>) -> Result<Option<TaskSort>, String> {
    let Some(key) = sort_key.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let key: SortKey = parse_label(key, "sort_key")?;
    let order: SortOrder = match sort_order.map(str::trim).filter(|value| !value.is_empty()) {
        Some(order) => parse_label(order, "sort_order")?,
        None => SortOrder::default(),
    };
    Ok(Some(TaskSort::new(key, order)))
}

fn parse_label<T: serde::de::DeserializeOwned>(value: &str, field: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(value.to_ascii_lowercase()))
        .map_err(|_| format!("unsupported {field} `{value}`"))
}

fn to_notification_item(notification: Notification) -> NotificationItem {
    NotificationItem {
        id: notification.id,
        task_id: notification.task_id,
        task_title: notification.task_title,
        kind: notification.kind.as_str().to_string(),
        message: notification.message,
        due_date: notification.due_date,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
