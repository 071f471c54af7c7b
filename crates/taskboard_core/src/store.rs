use crate::backend::Backend;
use crate::error::{BackendError, StoreError};
use crate::model::{Task, TaskInput, TaskPatch};
use crate::normalize::{self, TaskPatchPayload, TaskPayload};
use crate::session::Session;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::{Mutex, watch};

/// Snapshot published to observers after every state change.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub tasks: Vec<Task>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Owns the authoritative in-memory task collection for one session and
/// keeps it synchronized with a backing store.
///
/// Constructed explicitly once per session; consumers hold the handle
/// and observe state through [`TaskStore::subscribe`]. All mutation of
/// the collection goes through the four operations below - observers
/// never see a half-applied change because every mutation happens
/// synchronously inside a single `send_modify` closure after the
/// awaited backend response arrives.
///
/// The loading flag uses an in-flight counter: it turns on when the
/// first operation starts and off when the last concurrent operation
/// settles. The error slot is cleared at the start of every operation
/// and set on failure, so it always holds the most recent failure's
/// message.
pub struct TaskStore {
    backend: Arc<dyn Backend>,
    session: Mutex<Option<Session>>,
    state: watch::Sender<StoreState>,
    in_flight: AtomicUsize,
}

impl TaskStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            backend,
            session: Mutex::new(None),
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Observe the collection, loading flag and error slot.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Edge trigger from the auth collaborator. A transition to a
    /// present session re-fetches the collection; a transition to no
    /// session clears it. Handing in the unchanged session is a no-op.
    pub async fn set_session(&self, session: Option<Session>) {
        let previous = {
            let mut guard = self.session.lock().await;
            std::mem::replace(&mut *guard, session.clone())
        };

        if previous == session {
            return;
        }

        match session {
            Some(_) => self.fetch_tasks().await,
            None => {
                tracing::debug!("session cleared, dropping task collection");
                self.state.send_modify(|state| {
                    state.tasks.clear();
                    state.error = None;
                });
            }
        }
    }

    /// Loads the full collection from the backing store, replacing the
    /// in-memory collection wholesale. Failures are absorbed into the
    /// error slot; the existing collection is left untouched.
    pub async fn fetch_tasks(&self) {
        self.begin_op();
        match self.fetch_inner().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "fetched task collection");
                self.state.send_modify(|state| state.tasks = tasks);
                self.finish_op(None);
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "fetch_tasks failed: {err}");
                self.finish_op(Some(err.user_message()));
            }
        }
    }

    /// Creates a task: assigns a fresh id, stamps `created_at` and the
    /// session's `user_id`, persists, then appends the record echoed by
    /// the backing store. Nothing is inserted before confirmation, so a
    /// failed create leaves the collection untouched.
    pub async fn add_task(&self, input: TaskInput) -> Result<Task, StoreError> {
        self.begin_op();
        let outcome = self.add_inner(input).await;
        match &outcome {
            Ok(task) => {
                tracing::debug!(id = %task.id, "task added");
                self.finish_op(None);
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "add_task failed: {err}");
                self.finish_op(Some(err.user_message()));
            }
        }
        outcome
    }

    /// Applies a partial update to an existing task. Fields absent from
    /// the patch are left unchanged. A task deleted while the update was
    /// in flight is not resurrected; the update reports failure instead.
    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        self.begin_op();
        let outcome = self.update_inner(id, patch).await;
        match &outcome {
            Ok(task) => {
                tracing::debug!(id = %task.id, "task updated");
                self.finish_op(None);
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "update_task failed: {err}");
                self.finish_op(Some(err.user_message()));
            }
        }
        outcome
    }

    /// Removes a task from the backing store and, only on success, from
    /// the in-memory collection. On failure neither copy is removed.
    pub async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        self.begin_op();
        let outcome = self.delete_inner(id).await;
        match &outcome {
            Ok(()) => {
                tracing::debug!(id, "task deleted");
                self.finish_op(None);
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "delete_task failed: {err}");
                self.finish_op(Some(err.user_message()));
            }
        }
        outcome
    }

    async fn fetch_inner(&self) -> Result<Vec<Task>, StoreError> {
        let session = self.current_session().await?;
        let raw = self
            .backend
            .list(&session)
            .await
            .map_err(StoreError::FetchFailed)?;

        let mut tasks = Vec::with_capacity(raw.len());
        for record in raw {
            tasks.push(normalize::normalize(record).map_err(StoreError::FetchFailed)?);
        }
        Ok(tasks)
    }

    async fn add_inner(&self, mut input: TaskInput) -> Result<Task, StoreError> {
        let trimmed = input.title.trim().to_string();
        if trimmed.is_empty() {
            return Err(StoreError::invalid_input("title is required"));
        }
        input.title = trimmed;

        let session = self.current_session().await?;
        let now = OffsetDateTime::now_utc();
        let created_at = now
            .format(&Rfc3339)
            .map_err(|err| StoreError::CreateFailed(BackendError::invalid_data(err.to_string())))?;
        let id = format!("task-{}", now.unix_timestamp_nanos());

        let payload = TaskPayload::new(id, created_at, session.user_id.clone(), &input);
        let echo = self
            .backend
            .create(&session, &payload)
            .await
            .map_err(StoreError::CreateFailed)?;
        let task = normalize::normalize(echo).map_err(StoreError::CreateFailed)?;

        let appended = task.clone();
        self.state.send_modify(move |state| state.tasks.push(appended));
        Ok(task)
    }

    async fn update_inner(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::invalid_input("id is required"));
        }
        if let Some(title) = patch.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(StoreError::invalid_input("title is required"));
        }

        let session = self.current_session().await?;
        let known = self
            .state
            .borrow()
            .tasks
            .iter()
            .any(|task| task.id == trimmed_id);
        if !known {
            return Err(StoreError::invalid_input("task not found"));
        }

        let payload = TaskPatchPayload::from_patch(&patch);
        let echo = self
            .backend
            .update(&session, trimmed_id, &payload)
            .await
            .map_err(StoreError::UpdateFailed)?;
        let updated = normalize::normalize(echo).map_err(StoreError::UpdateFailed)?;

        let mut replaced = false;
        let replacement = updated.clone();
        self.state.send_modify(|state| {
            if let Some(slot) = state
                .tasks
                .iter_mut()
                .find(|task| task.id == trimmed_id)
            {
                *slot = replacement;
                replaced = true;
            }
        });

        if !replaced {
            // Deleted while the update was in flight.
            return Err(StoreError::UpdateFailed(BackendError::invalid_data(
                "task no longer present",
            )));
        }
        Ok(updated)
    }

    async fn delete_inner(&self, id: &str) -> Result<(), StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::invalid_input("id is required"));
        }

        let session = self.current_session().await?;
        self.backend
            .delete(&session, trimmed_id)
            .await
            .map_err(StoreError::DeleteFailed)?;

        self.state.send_modify(|state| {
            if let Some(index) = state.tasks.iter().position(|task| task.id == trimmed_id) {
                state.tasks.remove(index);
            }
        });
        Ok(())
    }

    async fn current_session(&self) -> Result<Session, StoreError> {
        self.session.lock().await.clone().ok_or(StoreError::NoSession)
    }

    // The counter moves together with the flag inside `send_modify`, so
    // a begin_op interleaving between decrement and publish can never
    // make observers see a stale `is_loading`.
    fn begin_op(&self) {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.is_loading = true;
            state.error = None;
        });
    }

    fn finish_op(&self, error: Option<String>) {
        self.state.send_modify(|state| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            state.is_loading = remaining > 0;
            if let Some(message) = error {
                state.error = Some(message);
            }
        });
    }
}
