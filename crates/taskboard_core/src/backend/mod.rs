pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteApi;

use crate::error::BackendError;
use crate::normalize::{RawTask, TaskPatchPayload, TaskPayload};
use crate::session::Session;
use async_trait::async_trait;

/// Persistence behind the task store.
///
/// Implementations hand back raw records exactly as stored or received;
/// translation to the canonical in-memory shape happens in the store.
/// `create` and `update` echo the authoritative record.
#[async_trait]
pub trait Backend: std::fmt::Debug + Send + Sync {
    /// Read the whole task collection for the session.
    async fn list(&self, session: &Session) -> Result<Vec<RawTask>, BackendError>;

    /// Persist a new task and echo the created record.
    async fn create(
        &self,
        session: &Session,
        payload: &TaskPayload,
    ) -> Result<RawTask, BackendError>;

    /// Persist changed fields and echo the updated record.
    async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: &TaskPatchPayload,
    ) -> Result<RawTask, BackendError>;

    /// Persist removal. Failure means the record was not removed.
    async fn delete(&self, session: &Session, id: &str) -> Result<(), BackendError>;
}
