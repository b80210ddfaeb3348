use async_trait::async_trait;

use super::base::{FileIdsBody, PollStatus, RequestHandle, collect_ids, first, submit_jobs};
use super::batch::get_statuses;
use crate::clients::DocAiClient;
use crate::error::DocAiResult;
use crate::models::{BatchStatuses, MlcResult};

const SUBMIT_PATH: &str = "api/v2/mlc";
const STATUSES_PATH: &str = "api/v2/mlcs";

/// Multi-level classification of one file.
#[derive(Debug, Clone)]
pub struct MlcRequest {
    handle: RequestHandle,
    file_id: Option<String>,
}

impl MlcRequest {
    pub async fn submit<I>(client: &DocAiClient, file_ids: I) -> DocAiResult<Vec<Self>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let file_ids = collect_ids(file_ids, "file id")?;
        let body = FileIdsBody {
            file_ids: &file_ids,
            field_ids: None,
        };
        let statuses: Vec<MlcResult> = submit_jobs(client, SUBMIT_PATH, &body).await?;

        Ok(statuses
            .into_iter()
            .map(|status| Self {
                handle: RequestHandle::submitted(client.clone(), &status),
                file_id: status.file_id,
            })
            .collect())
    }

    pub async fn submit_one(client: &DocAiClient, file_id: impl Into<String>) -> DocAiResult<Self> {
        let file_id: String = file_id.into();
        first(Self::submit(client, [file_id]).await?, SUBMIT_PATH)
    }

    pub fn from_id(client: DocAiClient, request_id: impl Into<String>) -> Self {
        Self {
            handle: RequestHandle::resumed(client, request_id),
            file_id: None,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub async fn get_statuses<I>(client: &DocAiClient, request_ids: I) -> DocAiResult<BatchStatuses<MlcResult>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        get_statuses(client, STATUSES_PATH, request_ids).await
    }
}

#[async_trait]
impl PollStatus for MlcRequest {
    type Status = MlcResult;

    fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    async fn fetch_status(&self) -> DocAiResult<MlcResult> {
        let path = format!("{SUBMIT_PATH}/{}", self.request_id());
        self.handle.client().get_json(&path, 200).await
    }
}
