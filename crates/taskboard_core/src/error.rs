use thiserror::Error;

/// Failure reported by a backing store (local file or remote API).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io_error - {0}")]
    Io(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("http_error - {0}")]
    Http(String),
}

impl BackendError {
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn http<M: Into<String>>(message: M) -> Self {
        Self::Http(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::InvalidData(_) => "invalid_data",
            Self::Http(_) => "http_error",
        }
    }
}

/// Failure surfaced by the task store to its callers.
///
/// The four operation variants carry the backend cause; their display
/// string is the static user-facing message that also lands in the
/// store's error slot. None of these are fatal - the store stays usable
/// after any of them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("no_session - no active session")]
    NoSession,
    #[error("fetch_failed - Failed to fetch tasks")]
    FetchFailed(#[source] BackendError),
    #[error("create_failed - Failed to add task")]
    CreateFailed(#[source] BackendError),
    #[error("update_failed - Failed to update task")]
    UpdateFailed(#[source] BackendError),
    #[error("delete_failed - Failed to delete task")]
    DeleteFailed(#[source] BackendError),
}

impl StoreError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NoSession => "no_session",
            Self::FetchFailed(_) => "fetch_failed",
            Self::CreateFailed(_) => "create_failed",
            Self::UpdateFailed(_) => "update_failed",
            Self::DeleteFailed(_) => "delete_failed",
        }
    }

    /// Message placed in the store's error slot when this failure is
    /// recorded.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::NoSession => "No active session".to_string(),
            Self::FetchFailed(_) => "Failed to fetch tasks".to_string(),
            Self::CreateFailed(_) => "Failed to add task".to_string(),
            Self::UpdateFailed(_) => "Failed to update task".to_string(),
            Self::DeleteFailed(_) => "Failed to delete task".to_string(),
        }
    }
}
