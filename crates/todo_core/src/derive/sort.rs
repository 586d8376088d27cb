//! Task list ordering.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep their input order.
//! - Missing or unparsable dates sort after present ones in both orders.
//! - Descending order reverses only comparisons between present values.

use crate::model::task::Task;
use crate::time::classifier::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Priority,
    DueDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Requested ordering for a task list. Defaults to newest first.
///
/// Undated tasks stay at the end in descending order too; the order flip
/// applies only between two present dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl TaskSort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Compares two tasks under this ordering.
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        match self.key {
            SortKey::Priority => self.order.apply(
                left.effective_priority()
                    .weight()
                    .cmp(&right.effective_priority().weight()),
            ),
            SortKey::DueDate => self.compare_optional(
                timestamp_of(left.due_date.as_deref()),
                timestamp_of(right.due_date.as_deref()),
            ),
            SortKey::CreatedAt => self.compare_optional(
                timestamp_of(left.created_at.as_deref()),
                timestamp_of(right.created_at.as_deref()),
            ),
        }
    }

    fn compare_optional(
        &self,
        left: Option<NaiveDateTime>,
        right: Option<NaiveDateTime>,
    ) -> Ordering {
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => self.order.apply(left.cmp(&right)),
        }
    }
}

fn timestamp_of(value: Option<&str>) -> Option<NaiveDateTime> {
    value.and_then(parse_timestamp)
}

/// Sorts `tasks` in place (stable).
pub fn sort_tasks(tasks: &mut [Task], sort: TaskSort) {
    tasks.sort_by(|left, right| sort.compare(left, right));
}

/// Returns a sorted copy of `tasks`, leaving the input untouched.
pub fn sorted_tasks(tasks: &[Task], sort: TaskSort) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sort_tasks(&mut sorted, sort);
    sorted
}
