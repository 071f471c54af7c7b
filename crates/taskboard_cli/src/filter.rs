use taskboard_core::model::{Task, TaskPriority, TaskStatus};

/// Client-side filter over the store's read-only task view. The store is
/// not involved; this is pure presentation-side selection.
pub fn filter_tasks(
    tasks: &[Task],
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    search: Option<&str>,
) -> Vec<Task> {
    let needle = search.map(str::to_ascii_lowercase);

    tasks
        .iter()
        .filter(|task| status.is_none_or(|status| task.status == status))
        .filter(|task| priority.is_none_or(|priority| task.priority == priority))
        .filter(|task| {
            needle.as_deref().is_none_or(|needle| {
                task.title.to_ascii_lowercase().contains(needle)
                    || task.description.to_ascii_lowercase().contains(needle)
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_tasks;
    use taskboard_core::model::{Task, TaskPriority, TaskStatus};

    fn task(id: &str, title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status,
            priority,
            due_date: String::new(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn filters_by_status_and_priority() {
        let tasks = vec![
            task("1", "alpha", TaskStatus::Todo, TaskPriority::Low),
            task("2", "beta", TaskStatus::Done, TaskPriority::High),
            task("3", "gamma", TaskStatus::Todo, TaskPriority::High),
        ];

        let todo = filter_tasks(&tasks, Some(TaskStatus::Todo), None, None);
        assert_eq!(todo.len(), 2);

        let todo_high = filter_tasks(
            &tasks,
            Some(TaskStatus::Todo),
            Some(TaskPriority::High),
            None,
        );
        assert_eq!(todo_high.len(), 1);
        assert_eq!(todo_high[0].id, "3");
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut with_description = task("1", "alpha", TaskStatus::Todo, TaskPriority::Low);
        with_description.description = "quarterly REPORT".to_string();
        let tasks = vec![
            with_description,
            task("2", "Write Report", TaskStatus::Todo, TaskPriority::Low),
            task("3", "unrelated", TaskStatus::Todo, TaskPriority::Low),
        ];

        let found = filter_tasks(&tasks, None, None, Some("report"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let tasks = vec![
            task("1", "first", TaskStatus::Todo, TaskPriority::Low),
            task("2", "second", TaskStatus::Done, TaskPriority::High),
        ];

        let all = filter_tasks(&tasks, None, None, None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[1].id, "2");
    }
}
