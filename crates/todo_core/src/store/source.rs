//! Task source contracts and the in-memory implementation.
//!
//! # Responsibility
//! - Define how services obtain task lists without knowing the transport.
//! - Define the backend list query and its query-string encoding.
//!
//! # Invariants
//! - Sources only read; core never writes tasks back.
//! - `InMemoryTaskSource` applies the same query semantics as the backend.

use crate::model::task::{Priority, Task};
use crate::time::classifier::parse_timestamp;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while obtaining tasks from a source.
#[derive(Debug)]
pub enum StoreError {
    /// Source configuration is unusable (e.g. empty base URL).
    Config(String),
    /// No bearer token available; no request was sent.
    MissingToken,
    /// Backend rejected the credentials (401/403).
    Unauthorized { status: u16, detail: Option<String> },
    /// Backend returned another non-success status.
    Http { status: u16, detail: Option<String> },
    /// Request could not be sent or the response could not be read.
    Transport(reqwest::Error),
    /// Response body is not a task list.
    Decode(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "invalid task source configuration: {message}"),
            Self::MissingToken => write!(f, "no authentication token available"),
            Self::Unauthorized { status, detail } => match detail {
                Some(detail) => write!(f, "authentication error ({status}): {detail}"),
                None => write!(f, "authentication error ({status})"),
            },
            Self::Http { status, detail } => match detail {
                Some(detail) => write!(f, "task request failed ({status}): {detail}"),
                None => write!(f, "task request failed ({status})"),
            },
            Self::Transport(err) => write!(f, "task request transport error: {err}"),
            Self::Decode(message) => write!(f, "invalid task list response: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Server-side list query for `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// ISO-8601 upper bound (exclusive) on the due date.
    pub due_before: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TaskQuery {
    /// Encodes the set fields as query-string pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(completed) = self.completed {
            pairs.push(("completed", completed.to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(due_before) = &self.due_before {
            pairs.push(("due_before", due_before.clone()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }

    /// Whether `task` satisfies the non-paging criteria.
    pub fn matches(&self, task: &Task) -> bool {
        if self.completed.is_some_and(|completed| task.completed != completed) {
            return false;
        }
        if self
            .priority
            .is_some_and(|priority| task.effective_priority() != priority)
        {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !task.tags.contains(tag) {
                return false;
            }
        }
        if let Some(bound) = self.due_before.as_deref().and_then(parse_timestamp) {
            let due = task.due_date.as_deref().and_then(parse_timestamp);
            if !due.is_some_and(|due| due < bound) {
                return false;
            }
        }
        true
    }
}

/// Read-only supplier of task lists.
pub trait TaskSource {
    fn fetch_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>>;
}

/// Task source over a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    tasks: Vec<Task>,
}

impl InMemoryTaskSource {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskSource for InMemoryTaskSource {
    fn fetch_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(self
            .tasks
            .iter()
            .filter(|task| query.matches(task))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTaskSource, TaskQuery, TaskSource};
    use crate::model::task::{Priority, Task};

    #[test]
    fn query_pairs_skip_unset_fields() {
        let query = TaskQuery {
            completed: Some(false),
            priority: Some(Priority::High),
            limit: Some(50),
            offset: Some(0),
            ..TaskQuery::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("completed", "false".to_string()),
                ("priority", "high".to_string()),
                ("limit", "50".to_string()),
                ("offset", "0".to_string()),
            ]
        );
        assert!(TaskQuery::default().query_pairs().is_empty());
    }

    #[test]
    fn in_memory_source_applies_filters_and_paging() {
        let source = InMemoryTaskSource::new(vec![
            Task::new("1", "a").with_due_date("2026-10-01"),
            Task::new("2", "b").completed(),
            Task::new("3", "c").with_due_date("2026-10-05"),
            Task::new("4", "d").with_due_date("2026-11-01"),
        ]);

        let open = source
            .fetch_tasks(&TaskQuery {
                completed: Some(false),
                offset: Some(1),
                limit: Some(1),
                ..TaskQuery::default()
            })
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "3");

        let due_soon = source
            .fetch_tasks(&TaskQuery {
                due_before: Some("2026-10-10".to_string()),
                ..TaskQuery::default()
            })
            .unwrap();
        let ids: Vec<&str> = due_soon.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
