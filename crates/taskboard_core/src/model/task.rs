use serde::{Deserialize, Serialize};

/// A single to-do item owned by a user.
///
/// `status` and `priority` always hold canonical enum members in memory;
/// raw backend spellings are translated at the store boundary. `id`,
/// `created_at` and `user_id` are set once at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: String,
    pub created_at: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Canonical spelling used in memory and on UI-facing output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Fields supplied by the caller when creating a task. The store assigns
/// `id`, `created_at` and `user_id` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: String,
}

/// Partial update. Absent fields are left unchanged; `id`, `created_at`
/// and `user_id` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPriority, TaskStatus};

    #[test]
    fn status_serializes_with_canonical_spelling() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let parsed: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: "2026-01-05T00:00:00Z".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            user_id: "user-1".to_string(),
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2026-01-05T00:00:00Z");
        assert_eq!(value["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["status"], "todo");
        assert_eq!(value["priority"], "medium");
    }
}
