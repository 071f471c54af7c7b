mod task;

pub use task::{Task, TaskInput, TaskPatch, TaskPriority, TaskStatus};
