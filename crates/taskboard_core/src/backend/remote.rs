use crate::backend::Backend;
use crate::error::BackendError;
use crate::normalize::{RawTask, TaskPatchPayload, TaskPayload};
use crate::session::Session;
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote backing store: the REST collaborator behind `/api/Tasks`.
///
/// Every request carries the session's bearer credential; any non-2xx
/// response is a uniform operation failure.
#[derive(Debug)]
pub struct RemoteApi {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteApi {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| BackendError::http(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/Tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/api/Tasks/{}", self.base_url, id)
    }
}

fn http_error(err: reqwest::Error) -> BackendError {
    BackendError::http(err.to_string())
}

#[async_trait]
impl Backend for RemoteApi {
    async fn list(&self, session: &Session) -> Result<Vec<RawTask>, BackendError> {
        let resp = self
            .client
            .get(self.collection_url())
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        resp.json::<Vec<RawTask>>()
            .await
            .map_err(|err| BackendError::invalid_data(err.to_string()))
    }

    async fn create(
        &self,
        session: &Session,
        payload: &TaskPayload,
    ) -> Result<RawTask, BackendError> {
        let resp = self
            .client
            .post(self.collection_url())
            .bearer_auth(&session.token)
            .json(payload)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        resp.json::<RawTask>()
            .await
            .map_err(|err| BackendError::invalid_data(err.to_string()))
    }

    async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: &TaskPatchPayload,
    ) -> Result<RawTask, BackendError> {
        let resp = self
            .client
            .put(self.task_url(id))
            .bearer_auth(&session.token)
            .json(patch)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        resp.json::<RawTask>()
            .await
            .map_err(|err| BackendError::invalid_data(err.to_string()))
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<(), BackendError> {
        self.client
            .delete(self.task_url(id))
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        Ok(())
    }
}
