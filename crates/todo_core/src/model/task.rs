//! Task domain model.
//!
//! # Responsibility
//! - Define the strict task record consumed by every derivation.
//! - Normalize loosely-typed backend payloads at the boundary.
//!
//! # Invariants
//! - `id` and `title` are never blank on a constructed `Task`.
//! - `priority` is either a known level or `None` (read as `Medium`).
//! - Blank optional text fields are stored as `None`.
//! - Derivations never mutate a `Task`; they read it.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque task identifier assigned by the task backend.
pub type TaskId = String;

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Stable lowercase wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Ordering weight used by priority sort (`high > medium > low`).
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Parses a priority leniently (trimmed, case-insensitive).
///
/// Returns `None` for unknown values instead of failing.
pub fn parse_priority(value: &str) -> Option<Priority> {
    match value.trim().to_ascii_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

/// Canonical task record.
///
/// Deserialization goes through [`RawTask`], so any JSON accepted here has
/// already been normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// `None` when the backend sent nothing usable; read as `Medium`.
    pub priority: Option<Priority>,
    /// Raw ISO-8601 text as received. Parsed lazily by the classifier.
    pub due_date: Option<String>,
    pub tags: Vec<String>,
    /// Presence alone marks the task as recurring.
    pub recurrence_pattern: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub user_id: Option<String>,
}

impl Task {
    /// Creates an open task with every optional field empty.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            priority: None,
            due_date: None,
            tags: Vec::new(),
            recurrence_pattern: None,
            created_at: None,
            updated_at: None,
            user_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recurrence(mut self, pattern: impl Into<String>) -> Self {
        self.recurrence_pattern = Some(pattern.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Marks the task as completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Priority with the `medium` default applied.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or(Priority::Medium)
    }

    /// Returns the recurrence token when it is present and non-blank.
    pub fn recurrence(&self) -> Option<&str> {
        self.recurrence_pattern
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Loose wire shape of a task as sent by the backend.
///
/// Every field may be missing or null. `priority` accepts any JSON value and
/// `id` accepts a string or a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTask {
    #[serde(default)]
    pub id: Value,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Value,
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub recurrence_pattern: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub user_id: Option<String>,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskValidationError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let id = normalize_id(&raw.id).ok_or(TaskValidationError::MissingId)?;
        let title = raw
            .title
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(TaskValidationError::MissingTitle)?;
        let priority = match &raw.priority {
            Value::String(value) => parse_priority(value),
            _ => None,
        };
        let tags = raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            id,
            title,
            description: non_blank(raw.description),
            completed: raw.completed.unwrap_or(false),
            priority,
            due_date: non_blank(raw.due_date),
            tags,
            recurrence_pattern: non_blank(raw.recurrence_pattern),
            created_at: non_blank(raw.created_at),
            updated_at: non_blank(raw.updated_at),
            user_id: non_blank(raw.user_id),
        })
    }
}

fn normalize_id(value: &Value) -> Option<TaskId> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Boundary validation errors for task payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `id` is missing, blank, or not a string/number.
    MissingId,
    /// `title` is missing or blank.
    MissingTitle,
    /// Record is not a task-shaped JSON object.
    Malformed(String),
}

impl TaskValidationError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingId => "missing_id",
            Self::MissingTitle => "missing_title",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "task id must be a non-blank string or number"),
            Self::MissingTitle => write!(f, "task title must not be blank"),
            Self::Malformed(message) => write!(f, "malformed task record: {message}"),
        }
    }
}

impl Error for TaskValidationError {}

/// One record skipped by [`decode_tasks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTask {
    /// Position in the source array.
    pub index: usize,
    pub reason: TaskValidationError,
}

/// Lenient batch decode result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTasks {
    /// Valid tasks in source order.
    pub tasks: Vec<Task>,
    pub rejected: Vec<RejectedTask>,
}

/// Decodes a batch of JSON task records, skipping invalid ones.
///
/// Rejections are logged with index and reason code only.
pub fn decode_tasks(values: Vec<Value>) -> DecodedTasks {
    let mut decoded = DecodedTasks::default();
    for (index, value) in values.into_iter().enumerate() {
        let result = serde_json::from_value::<RawTask>(value)
            .map_err(|err| TaskValidationError::Malformed(err.to_string()))
            .and_then(Task::try_from);
        match result {
            Ok(task) => decoded.tasks.push(task),
            Err(reason) => {
                warn!(
                    "event=task_rejected module=model status=error index={} reason={}",
                    index,
                    reason.code()
                );
                decoded.rejected.push(RejectedTask { index, reason });
            }
        }
    }
    decoded
}

/// Decodes a JSON array text of task records.
///
/// # Errors
/// - Returns the parse error when `json` is not a JSON array.
pub fn decode_tasks_json(json: &str) -> Result<DecodedTasks, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(decode_tasks(values))
}
