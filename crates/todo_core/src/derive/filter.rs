//! Task list filtering.
//!
//! # Invariants
//! - Every active criterion must hold (logical AND across criteria).
//! - An empty criterion selects everything, never nothing.
//! - Tag selection matches when any task tag is selected (OR across tags).
//! - Filtering preserves input order.

use crate::model::task::{Priority, Task};
use serde::{Deserialize, Serialize};

/// Completion-state criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Transient filter input from the task list UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Case-insensitive substring over title and description.
    ///
    /// Surrounding whitespace is trimmed first, so a blank term matches
    /// every task and `" rent "` matches "Pay rent".
    pub search_term: String,
    pub selected_priorities: Vec<Priority>,
    pub selected_tags: Vec<String>,
    pub status: StatusFilter,
}

impl FilterState {
    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.selected_priorities.is_empty()
            && self.selected_tags.is_empty()
            && self.status == StatusFilter::All
    }

    /// Evaluates every criterion against one task.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.matches_priority(task)
            && self.matches_tags(task)
            && self.status.matches(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.selected_priorities.is_empty()
            || self
                .selected_priorities
                .contains(&task.effective_priority())
    }

    fn matches_tags(&self, task: &Task) -> bool {
        self.selected_tags.is_empty()
            || task.tags.iter().any(|tag| self.selected_tags.contains(tag))
    }
}

/// Returns the tasks matching `state`, in input order.
pub fn filter_tasks(tasks: &[Task], state: &FilterState) -> Vec<Task> {
    filter_task_refs(tasks, state).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter_tasks`].
pub fn filter_task_refs<'a>(tasks: &'a [Task], state: &FilterState) -> Vec<&'a Task> {
    tasks.iter().filter(|task| state.matches(task)).collect()
}
