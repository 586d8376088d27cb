//! Due-date notification derivation.
//!
//! # Responsibility
//! - Project a task list onto due-today/overdue/upcoming/recurring
//!   notifications for one reference instant.
//! - Provide the badge count, list filtering and grouping used by the UI.
//!
//! # Invariants
//! - Pure function of `(tasks, now, policy)`; output is rebuilt on every call.
//! - At most one due-date notification per task per pass.
//! - Completed tasks never produce due-date notifications.
//! - `count_notifications` always equals `generate_notifications(..).len()`.

use crate::model::notification::{Notification, NotificationKind};
use crate::model::task::Task;
use crate::time::classifier::{DateClassifier, DayRelation};
use chrono::{DateTime, NaiveDate, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};

/// Upcoming window used by the dashboard reminder path.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 3;
/// Upcoming window used by the extended reminder path.
pub const EXTENDED_UPCOMING_WINDOW_DAYS: u32 = 7;

/// Tunables for notification derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPolicy {
    /// Future due dates at most this many days ahead count as upcoming.
    pub upcoming_window_days: u32,
    /// Whether completed recurring tasks still produce a recurring reminder.
    pub remind_completed_recurring: bool,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            remind_completed_recurring: false,
        }
    }
}

impl NotificationPolicy {
    /// Policy for the extended (7-day) reminder path.
    pub fn extended() -> Self {
        Self {
            upcoming_window_days: EXTENDED_UPCOMING_WINDOW_DAYS,
            ..Self::default()
        }
    }

    pub fn with_upcoming_window_days(mut self, days: u32) -> Self {
        self.upcoming_window_days = days;
        self
    }

    pub fn with_remind_completed_recurring(mut self, enabled: bool) -> Self {
        self.remind_completed_recurring = enabled;
        self
    }
}

/// Per-task outcome of one derivation pass.
struct TaskOutcome {
    due: Option<(NotificationKind, NaiveDate)>,
    recurring: bool,
}

impl TaskOutcome {
    fn len(&self) -> usize {
        usize::from(self.due.is_some()) + usize::from(self.recurring)
    }
}

fn evaluate<Tz: TimeZone>(
    task: &Task,
    classifier: &DateClassifier<Tz>,
    policy: &NotificationPolicy,
) -> TaskOutcome {
    let due = if task.completed {
        None
    } else {
        classifier
            .day_of(&task.due_date)
            .and_then(|day| match classifier.relation(day) {
                DayRelation::Today => Some((NotificationKind::DueToday, day)),
                DayRelation::Future
                    if classifier.upcoming_within(&day, policy.upcoming_window_days) =>
                {
                    Some((NotificationKind::UpcomingDueDate, day))
                }
                DayRelation::Future => None,
                DayRelation::Past => Some((NotificationKind::Overdue, day)),
            })
    };

    let recurring =
        task.recurrence().is_some() && (!task.completed || policy.remind_completed_recurring);

    TaskOutcome { due, recurring }
}

/// Derives notifications for `tasks` at `now`.
///
/// Output follows input task order; for one task the due-date notification
/// precedes the recurring reminder.
pub fn generate_notifications<Tz: TimeZone>(
    tasks: &[Task],
    now: &DateTime<Tz>,
    policy: &NotificationPolicy,
) -> Vec<Notification> {
    let classifier = DateClassifier::new(now);
    let mut notifications = Vec::new();

    for task in tasks {
        let outcome = evaluate(task, &classifier, policy);
        if let Some((kind, day)) = outcome.due {
            notifications.push(Notification::for_task(task, kind, Some(day)));
        }
        if outcome.recurring {
            notifications.push(Notification::for_task(
                task,
                NotificationKind::RecurringReminder,
                None,
            ));
        }
    }

    debug!(
        "event=notifications_generated module=notify status=ok tasks={} notifications={} window_days={}",
        tasks.len(),
        notifications.len(),
        policy.upcoming_window_days
    );
    notifications
}

/// Counts the notifications [`generate_notifications`] would produce.
///
/// Shares the per-task decision with the generator without building records.
pub fn count_notifications<Tz: TimeZone>(
    tasks: &[Task],
    now: &DateTime<Tz>,
    policy: &NotificationPolicy,
) -> usize {
    let classifier = DateClassifier::new(now);
    tasks
        .iter()
        .map(|task| evaluate(task, &classifier, policy).len())
        .sum()
}

/// Keeps notifications whose kind is in `kinds`; empty `kinds` keeps all.
pub fn filter_notifications_by_kind(
    notifications: &[Notification],
    kinds: &[NotificationKind],
) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|notification| kinds.is_empty() || kinds.contains(&notification.kind))
        .cloned()
        .collect()
}

/// Notifications of one kind, for grouped list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationGroup {
    pub kind: NotificationKind,
    pub notifications: Vec<Notification>,
}

/// Groups notifications by kind in first-seen order.
pub fn group_notifications_by_kind(notifications: &[Notification]) -> Vec<NotificationGroup> {
    let mut groups: Vec<NotificationGroup> = Vec::new();
    for notification in notifications {
        match groups.iter_mut().find(|group| group.kind == notification.kind) {
            Some(group) => group.notifications.push(notification.clone()),
            None => groups.push(NotificationGroup {
                kind: notification.kind,
                notifications: vec![notification.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::{
        count_notifications, generate_notifications, group_notifications_by_kind,
        NotificationPolicy,
    };
    use crate::model::notification::NotificationKind;
    use crate::model::task::Task;
    use chrono::{TimeZone, Utc};

    #[test]
    fn window_zero_never_yields_upcoming() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let tasks = vec![Task::new("a", "tomorrow").with_due_date("2026-10-19")];
        let policy = NotificationPolicy::default().with_upcoming_window_days(0);

        assert!(generate_notifications(&tasks, &now, &policy).is_empty());
        assert_eq!(count_notifications(&tasks, &now, &policy), 0);
    }

    #[test]
    fn upcoming_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap();
        let tasks = vec![
            Task::new("in", "edge").with_due_date("2026-10-21T23:00:00Z"),
            Task::new("out", "past edge").with_due_date("2026-10-22T00:00:00Z"),
        ];
        let notifications = generate_notifications(&tasks, &now, &NotificationPolicy::default());

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].task_id, "in");
        assert_eq!(notifications[0].kind, NotificationKind::UpcomingDueDate);
        assert_eq!(notifications[0].message, "'edge' is due on Oct 21, 2026.");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let tasks = vec![
            Task::new("a", "late").with_due_date("2026-10-01"),
            Task::new("b", "daily").with_recurrence("daily"),
            Task::new("c", "also late").with_due_date("2026-10-02"),
        ];
        let notifications = generate_notifications(&tasks, &now, &NotificationPolicy::default());
        let groups = group_notifications_by_kind(&notifications);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, NotificationKind::Overdue);
        assert_eq!(groups[0].notifications.len(), 2);
        assert_eq!(groups[0].notifications[1].task_id, "c");
        assert_eq!(groups[1].kind, NotificationKind::RecurringReminder);
    }
}
