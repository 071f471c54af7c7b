use crate::backend::Backend;
use crate::error::BackendError;
use crate::normalize::{RawTask, TaskPatchPayload, TaskPayload};
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "tasks.json";

/// On-disk document: the whole collection under one well-known key,
/// read wholesale and rewritten wholesale on every mutation.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    tasks: Vec<RawTask>,
}

/// Local-only backing store: a single JSON file holding raw records.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_path() -> Result<Self, BackendError> {
        Ok(Self::new(store_path()?))
    }
}

pub fn store_path() -> Result<PathBuf, BackendError> {
    if let Ok(path) = std::env::var("TASKBOARD_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| BackendError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskboard")
            .join(STORE_FILE_NAME))
    } else {
        let home =
            std::env::var("HOME").map_err(|_| BackendError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskboard")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_tasks(path: &Path) -> Result<Vec<RawTask>, BackendError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| BackendError::io(err.to_string()))?;
    let stored: StoredTasks =
        serde_json::from_str(&content).map_err(|err| BackendError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(BackendError::invalid_data("schema_version mismatch"));
    }

    Ok(stored.tasks)
}

pub fn save_tasks(path: &Path, tasks: &[RawTask]) -> Result<(), BackendError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| BackendError::io(err.to_string()))?;
    }

    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        tasks: tasks.to_vec(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| BackendError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| BackendError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|err| BackendError::io(err.to_string()))?;
    }

    Ok(())
}

fn apply_patch(record: &mut RawTask, patch: &TaskPatchPayload) {
    if let Some(title) = patch.title.as_ref() {
        record.title = title.clone();
    }
    if let Some(description) = patch.description.as_ref() {
        record.description = description.clone();
    }
    if let Some(status) = patch.status {
        record.status = status.to_string();
    }
    if let Some(priority) = patch.priority {
        record.priority = priority.to_string();
    }
    if let Some(due_date) = patch.due_date.as_ref() {
        record.due_date = due_date.clone();
    }
}

#[async_trait]
impl Backend for LocalStore {
    async fn list(&self, _session: &Session) -> Result<Vec<RawTask>, BackendError> {
        load_tasks(&self.path)
    }

    async fn create(
        &self,
        _session: &Session,
        payload: &TaskPayload,
    ) -> Result<RawTask, BackendError> {
        let mut tasks = load_tasks(&self.path)?;
        let record = RawTask {
            id: payload.id.clone(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status.to_string(),
            priority: payload.priority.to_string(),
            due_date: payload.due_date.clone(),
            created_at: payload.created_at.clone(),
            user_id: payload.user_id.clone(),
        };
        tasks.push(record.clone());
        save_tasks(&self.path, &tasks)?;
        Ok(record)
    }

    async fn update(
        &self,
        _session: &Session,
        id: &str,
        patch: &TaskPatchPayload,
    ) -> Result<RawTask, BackendError> {
        let mut tasks = load_tasks(&self.path)?;
        let record = tasks
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| BackendError::invalid_data("task not found"))?;

        apply_patch(record, patch);
        let updated = record.clone();
        save_tasks(&self.path, &tasks)?;
        Ok(updated)
    }

    async fn delete(&self, _session: &Session, id: &str) -> Result<(), BackendError> {
        let mut tasks = load_tasks(&self.path)?;
        let index = tasks
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| BackendError::invalid_data("task not found"))?;

        tasks.remove(index);
        save_tasks(&self.path, &tasks)
    }
}
