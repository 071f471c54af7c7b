use crate::error::BackendError;
use crate::model::{Task, TaskInput, TaskPatch, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Task record as received from a backing store, before validation.
///
/// `status` and `priority` arrive as free-form strings: case varies and
/// the remote backend spells in-progress as `inprogress`. Records are
/// mapped through [`normalize`] exactly once at the store boundary and
/// never trusted downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub due_date: String,
    pub created_at: String,
    pub user_id: String,
}

/// Outbound create payload. `status` carries the backend's compact
/// spelling; every other field passes through unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: &'static str,
    pub priority: &'static str,
    pub due_date: String,
    pub created_at: String,
    pub user_id: String,
}

impl TaskPayload {
    pub fn new(id: String, created_at: String, user_id: String, input: &TaskInput) -> Self {
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: compact_status(input.status),
            priority: input.priority.as_str(),
            due_date: input.due_date.clone(),
            created_at,
            user_id,
        }
    }
}

/// Outbound partial-update payload. Absent fields are omitted from the
/// JSON body entirely.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskPatchPayload {
    pub fn from_patch(patch: &TaskPatch) -> Self {
        Self {
            title: patch.title.clone(),
            description: patch.description.clone(),
            status: patch.status.map(compact_status),
            priority: patch.priority.map(|priority| priority.as_str()),
            due_date: patch.due_date.clone(),
        }
    }
}

/// Maps a raw record into the canonical in-memory shape.
///
/// Lower-cases `status`/`priority`, reconciles the compact spelling
/// `inprogress` with the canonical `in-progress`, and rejects values
/// outside the canonical vocabulary. Applying it to an already-canonical
/// record yields the same result.
pub fn normalize(raw: RawTask) -> Result<Task, BackendError> {
    let status = status_from_raw(&raw.status)
        .ok_or_else(|| BackendError::invalid_data(format!("unknown status: {}", raw.status)))?;
    let priority = priority_from_raw(&raw.priority)
        .ok_or_else(|| BackendError::invalid_data(format!("unknown priority: {}", raw.priority)))?;

    Ok(Task {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        status,
        priority,
        due_date: raw.due_date,
        created_at: raw.created_at,
        user_id: raw.user_id,
    })
}

/// Inverse status mapping for outbound writes: `in-progress` becomes the
/// backend's compact `inprogress`, the other members are identity.
pub fn compact_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "inprogress",
        TaskStatus::Done => "done",
    }
}

pub fn status_from_raw(raw: &str) -> Option<TaskStatus> {
    match raw.to_ascii_lowercase().as_str() {
        "todo" => Some(TaskStatus::Todo),
        "inprogress" | "in-progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}

pub fn priority_from_raw(raw: &str) -> Option<TaskPriority> {
    match raw.to_ascii_lowercase().as_str() {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}
