//! Derived notification model.
//!
//! # Responsibility
//! - Define the ephemeral notification record shown by the UI layer.
//! - Own the deterministic id scheme and user-facing message wording.
//!
//! # Invariants
//! - `id` is `"{task_id}-{suffix}"`, unique per (task, kind) in one pass.
//! - Notifications are projections; nothing here is persisted.

use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DueToday,
    Overdue,
    UpcomingDueDate,
    RecurringReminder,
}

/// Every kind, in the order the UI lists filter options.
pub const ALL_NOTIFICATION_KINDS: [NotificationKind; 4] = [
    NotificationKind::UpcomingDueDate,
    NotificationKind::DueToday,
    NotificationKind::Overdue,
    NotificationKind::RecurringReminder,
];

impl NotificationKind {
    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueToday => "due_today",
            Self::Overdue => "overdue",
            Self::UpcomingDueDate => "upcoming_due_date",
            Self::RecurringReminder => "recurring_reminder",
        }
    }

    /// Suffix appended to the task id to form the notification id.
    pub fn id_suffix(self) -> &'static str {
        match self {
            Self::DueToday => "today",
            Self::Overdue => "overdue",
            Self::UpcomingDueDate => "upcoming",
            Self::RecurringReminder => "recurring",
        }
    }

    /// Whether the kind is derived from the due date.
    pub fn is_due_date_kind(self) -> bool {
        !matches!(self, Self::RecurringReminder)
    }
}

/// Parses a wire value into a kind. Exact match only.
pub fn parse_notification_kind(value: &str) -> Option<NotificationKind> {
    ALL_NOTIFICATION_KINDS
        .into_iter()
        .find(|kind| kind.as_str() == value)
}

/// One derived notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub task_id: TaskId,
    pub task_title: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    /// Copied verbatim from the task.
    pub due_date: Option<String>,
}

impl Notification {
    /// Builds the notification of `kind` for `task`.
    ///
    /// `due_day` is the classified calendar day, used only for message text.
    pub fn for_task(task: &Task, kind: NotificationKind, due_day: Option<NaiveDate>) -> Self {
        Self {
            id: notification_id(&task.id, kind),
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            kind,
            message: render_message(task, kind, due_day),
            due_date: task.due_date.clone(),
        }
    }
}

/// Deterministic notification id.
pub fn notification_id(task_id: &str, kind: NotificationKind) -> String {
    format!("{task_id}-{}", kind.id_suffix())
}

/// Display format for due dates in messages, e.g. `Oct 18, 2026`.
pub fn format_display_date(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

fn render_message(task: &Task, kind: NotificationKind, due_day: Option<NaiveDate>) -> String {
    let title = task.title.as_str();
    match (kind, due_day) {
        (NotificationKind::DueToday, _) => format!("'{title}' is due today."),
        (NotificationKind::UpcomingDueDate, Some(day)) => {
            format!("'{title}' is due on {}.", format_display_date(day))
        }
        (NotificationKind::UpcomingDueDate, None) => format!("'{title}' is due soon."),
        (NotificationKind::Overdue, Some(day)) => format!(
            "'{title}' was due on {} and is overdue.",
            format_display_date(day)
        ),
        (NotificationKind::Overdue, None) => format!("'{title}' is overdue."),
        (NotificationKind::RecurringReminder, _) => format!(
            "Recurring: {}",
            task.recurrence().unwrap_or("Regular reminder")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_display_date, notification_id, parse_notification_kind, Notification,
        NotificationKind, ALL_NOTIFICATION_KINDS,
    };
    use crate::model::task::Task;
    use chrono::NaiveDate;

    #[test]
    fn ids_are_derived_from_task_and_kind() {
        assert_eq!(notification_id("t-1", NotificationKind::Overdue), "t-1-overdue");
        assert_eq!(notification_id("t-1", NotificationKind::DueToday), "t-1-today");
    }

    #[test]
    fn kinds_round_trip_through_wire_values() {
        for kind in ALL_NOTIFICATION_KINDS {
            assert_eq!(parse_notification_kind(kind.as_str()), Some(kind));
        }
        assert_eq!(parse_notification_kind("Overdue"), None);
    }

    #[test]
    fn display_date_uses_short_month() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_display_date(day), "Mar 7, 2026");
    }

    #[test]
    fn serializes_with_camel_case_and_type_field() {
        let task = Task::new("t-9", "Pay rent").with_due_date("2026-10-18");
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let notification = Notification::for_task(&task, NotificationKind::DueToday, Some(day));

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["id"], "t-9-today");
        assert_eq!(json["taskId"], "t-9");
        assert_eq!(json["taskTitle"], "Pay rent");
        assert_eq!(json["type"], "due_today");
        assert_eq!(json["dueDate"], "2026-10-18");
        assert_eq!(json["message"], "'Pay rent' is due today.");
    }
}
