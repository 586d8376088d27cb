//! Task dashboard use-case service.
//!
//! # Responsibility
//! - Fetch tasks through an injected source once per request.
//! - Run the independent derivations against one clock reading.
//!
//! # Invariants
//! - Service stays transport-agnostic; it only sees `TaskSource`.
//! - All derivations in one snapshot share the same "now".

use crate::config::preferences::NotificationPreferences;
use crate::derive::filter::{filter_tasks, FilterState};
use crate::derive::notifications::{count_notifications, generate_notifications};
use crate::derive::sort::{sort_tasks, TaskSort};
use crate::derive::tags::extract_unique_tags;
use crate::model::notification::Notification;
use crate::model::task::Task;
use crate::store::source::{StoreResult, TaskQuery, TaskSource};
use crate::time::clock::Clock;
use log::debug;
use serde::Serialize;

/// Everything the dashboard renders from one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Filtered, optionally sorted view.
    pub tasks: Vec<Task>,
    /// Number of fetched tasks before filtering.
    pub total_count: usize,
    /// Notifications over the full fetched list.
    pub notifications: Vec<Notification>,
    pub notification_count: usize,
    /// Tags over the full fetched list, for filter chips.
    pub unique_tags: Vec<String>,
}

/// Dashboard facade over a task source and a clock.
pub struct TaskDashboardService<S: TaskSource, C: Clock> {
    source: S,
    clock: C,
    preferences: NotificationPreferences,
}

impl<S: TaskSource, C: Clock> TaskDashboardService<S, C> {
    pub fn new(source: S, clock: C, preferences: NotificationPreferences) -> Self {
        Self {
            source,
            clock,
            preferences,
        }
    }

    pub fn preferences(&self) -> &NotificationPreferences {
        &self.preferences
    }

    /// Replaces preferences, e.g. after the user saved new settings.
    pub fn set_preferences(&mut self, preferences: NotificationPreferences) {
        self.preferences = preferences;
    }

    /// Fetches tasks from the source unchanged.
    pub fn load_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        self.source.fetch_tasks(query)
    }

    pub fn notifications(&self, tasks: &[Task]) -> Vec<Notification> {
        generate_notifications(tasks, &self.clock.now(), &self.preferences.policy())
    }

    pub fn notification_count(&self, tasks: &[Task]) -> usize {
        count_notifications(tasks, &self.clock.now(), &self.preferences.policy())
    }

    /// Badge value; `None` when the unread badge is turned off.
    pub fn badge_count(&self, tasks: &[Task]) -> Option<usize> {
        self.preferences
            .show_unread_badge
            .then(|| self.notification_count(tasks))
    }

    /// Fetches once and derives the full dashboard view.
    pub fn snapshot(
        &self,
        query: &TaskQuery,
        filter: &FilterState,
        sort: Option<TaskSort>,
    ) -> StoreResult<DashboardSnapshot> {
        let fetched = self.load_tasks(query)?;
        let now = self.clock.now();
        let policy = self.preferences.policy();

        let notifications = generate_notifications(&fetched, &now, &policy);
        let unique_tags = extract_unique_tags(&fetched);
        let mut tasks = filter_tasks(&fetched, filter);
        if let Some(sort) = sort {
            sort_tasks(&mut tasks, sort);
        }

        debug!(
            "event=dashboard_snapshot module=service status=ok total={} visible={} notifications={}",
            fetched.len(),
            tasks.len(),
            notifications.len()
        );
        Ok(DashboardSnapshot {
            tasks,
            total_count: fetched.len(),
            notification_count: notifications.len(),
            notifications,
            unique_tags,
        })
    }
}
