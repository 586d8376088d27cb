use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use todo_core::{
    count_notifications, filter_notifications_by_kind, generate_notifications, NotificationKind,
    NotificationPolicy, Task,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap()
}

fn kinds_for(tasks: &[Task], policy: &NotificationPolicy) -> Vec<(String, NotificationKind)> {
    generate_notifications(tasks, &now(), policy)
        .into_iter()
        .map(|notification| (notification.task_id, notification.kind))
        .collect()
}

fn mixed_tasks() -> Vec<Task> {
    vec![
        Task::new("today", "Ship release").with_due_date("2026-10-18T23:45:00Z"),
        Task::new("yesterday", "Pay invoice").with_due_date("2026-10-17"),
        Task::new("soon", "Dentist").with_due_date("2026-10-20T09:00:00"),
        Task::new("far", "Renew passport").with_due_date("2026-10-28"),
        Task::new("weekly", "Water plants").with_recurrence("weekly"),
        Task::new("both", "Standup").with_due_date("2026-10-18").with_recurrence("daily"),
        Task::new("done", "Old chore").with_due_date("2026-10-01").completed(),
        Task::new("broken", "Bad date").with_due_date("not-a-date").with_recurrence("monthly"),
    ]
}

#[test]
fn due_today_ignores_time_component() {
    let tasks = vec![Task::new("t-1", "Morning").with_due_date("2026-10-18T00:00:00Z")];
    let notifications = generate_notifications(&tasks, &now(), &NotificationPolicy::default());

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::DueToday);
    assert_eq!(notifications[0].task_id, "t-1");
    assert_eq!(notifications[0].id, "t-1-today");
    assert_eq!(notifications[0].due_date.as_deref(), Some("2026-10-18T00:00:00Z"));
}

#[test]
fn due_today_uses_reference_time_zone() {
    // 2026-10-18T22:00Z is already 2026-10-19 in UTC+3.
    let zone = FixedOffset::east_opt(3 * 3600).unwrap();
    let local_now = zone.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    let tasks = vec![Task::new("t-1", "Late night").with_due_date("2026-10-18T22:00:00Z")];

    let notifications = generate_notifications(&tasks, &local_now, &NotificationPolicy::default());
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::DueToday);
}

#[test]
fn yesterday_is_overdue() {
    let tasks = vec![Task::new("t-2", "Pay invoice").with_due_date("2026-10-17T08:00:00Z")];
    let notifications = generate_notifications(&tasks, &now(), &NotificationPolicy::default());

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Overdue);
    assert_eq!(notifications[0].id, "t-2-overdue");
    assert_eq!(
        notifications[0].message,
        "'Pay invoice' was due on Oct 17, 2026 and is overdue."
    );
}

#[test]
fn recurring_without_due_date_yields_only_reminder() {
    let tasks = vec![Task::new("t-3", "Water plants").with_recurrence("weekly")];
    let notifications = generate_notifications(&tasks, &now(), &NotificationPolicy::default());

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::RecurringReminder);
    assert_eq!(notifications[0].message, "Recurring: weekly");
    assert_eq!(notifications[0].due_date, None);
}

#[test]
fn ten_days_out_is_outside_seven_day_window() {
    let tasks = vec![Task::new("t-4", "Renew").with_due_date("2026-10-28")];
    let policy = NotificationPolicy::extended();

    assert_eq!(policy.upcoming_window_days, 7);
    assert!(generate_notifications(&tasks, &now(), &policy).is_empty());
}

#[test]
fn window_size_is_a_parameter() {
    let tasks = vec![Task::new("t-5", "Review").with_due_date("2026-10-23")];

    let dashboard = generate_notifications(&tasks, &now(), &NotificationPolicy::default());
    assert!(dashboard.is_empty());

    let extended = generate_notifications(&tasks, &now(), &NotificationPolicy::extended());
    assert_eq!(extended.len(), 1);
    assert_eq!(extended[0].kind, NotificationKind::UpcomingDueDate);
}

#[test]
fn mixed_list_follows_input_order_with_due_before_recurring() {
    let kinds = kinds_for(&mixed_tasks(), &NotificationPolicy::default());
    let expected: Vec<(String, NotificationKind)> = vec![
        ("today".to_string(), NotificationKind::DueToday),
        ("yesterday".to_string(), NotificationKind::Overdue),
        ("soon".to_string(), NotificationKind::UpcomingDueDate),
        ("weekly".to_string(), NotificationKind::RecurringReminder),
        ("both".to_string(), NotificationKind::DueToday),
        ("both".to_string(), NotificationKind::RecurringReminder),
        ("broken".to_string(), NotificationKind::RecurringReminder),
    ];
    assert_eq!(kinds, expected);
}

#[test]
fn completed_tasks_never_get_due_date_notifications() {
    let tasks = vec![
        Task::new("a", "done today").with_due_date("2026-10-18").completed(),
        Task::new("b", "done late").with_due_date("2026-09-01").completed(),
        Task::new("c", "done soon").with_due_date("2026-10-19").completed(),
    ];
    assert!(generate_notifications(&tasks, &now(), &NotificationPolicy::default()).is_empty());
}

#[test]
fn completed_recurring_reminder_follows_policy_flag() {
    let tasks = vec![Task::new("r", "Gym")
        .with_due_date("2026-10-18")
        .with_recurrence("daily")
        .completed()];

    let suppressed = generate_notifications(&tasks, &now(), &NotificationPolicy::default());
    assert!(suppressed.is_empty());

    let policy = NotificationPolicy::default().with_remind_completed_recurring(true);
    let reminded = generate_notifications(&tasks, &now(), &policy);
    assert_eq!(reminded.len(), 1);
    assert_eq!(reminded[0].kind, NotificationKind::RecurringReminder);
}

#[test]
fn at_most_one_due_date_notification_per_task() {
    let policies = [
        NotificationPolicy::default(),
        NotificationPolicy::extended(),
        NotificationPolicy::default().with_upcoming_window_days(0),
        NotificationPolicy::default().with_upcoming_window_days(365),
    ];
    let tasks: Vec<Task> = (-20..=20)
        .map(|offset: i64| {
            let due = now().date_naive() + chrono::Duration::days(offset);
            Task::new(format!("t{offset}"), "task").with_due_date(due.to_string())
        })
        .collect();

    for policy in &policies {
        let notifications = generate_notifications(&tasks, &now(), policy);
        for task in &tasks {
            let due_kinds = notifications
                .iter()
                .filter(|notification| notification.task_id == task.id)
                .filter(|notification| notification.kind.is_due_date_kind())
                .count();
            assert!(due_kinds <= 1, "task {} got {due_kinds}", task.id);
        }
        // Past and today always notify; future only inside the window.
        let expected = 21 + policy.upcoming_window_days.min(20) as usize;
        assert_eq!(notifications.len(), expected);
    }
}

#[test]
fn generation_is_idempotent() {
    let tasks = mixed_tasks();
    let policy = NotificationPolicy::default();
    let first = generate_notifications(&tasks, &now(), &policy);
    let second = generate_notifications(&tasks, &now(), &policy);
    assert_eq!(first, second);
}

#[test]
fn count_matches_generated_length() {
    let policies = [
        NotificationPolicy::default(),
        NotificationPolicy::extended(),
        NotificationPolicy::default().with_remind_completed_recurring(true),
    ];
    let task_sets = [Vec::new(), mixed_tasks(), mixed_tasks()[2..5].to_vec()];

    for policy in &policies {
        for tasks in &task_sets {
            assert_eq!(
                count_notifications(tasks, &now(), policy),
                generate_notifications(tasks, &now(), policy).len()
            );
        }
    }
}

#[test]
fn kind_filter_with_empty_selection_keeps_everything() {
    let notifications =
        generate_notifications(&mixed_tasks(), &now(), &NotificationPolicy::default());

    assert_eq!(
        filter_notifications_by_kind(&notifications, &[]).len(),
        notifications.len()
    );
    let overdue = filter_notifications_by_kind(&notifications, &[NotificationKind::Overdue]);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].task_id, "yesterday");
}
