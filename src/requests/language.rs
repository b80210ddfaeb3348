use async_trait::async_trait;

use super::base::{FileIdsBody, PollStatus, RequestHandle, collect_ids, first, submit_jobs};
use super::batch::get_statuses;
use crate::clients::DocAiClient;
use crate::error::DocAiResult;
use crate::models::{BatchStatuses, LanguageResult};

const SUBMIT_PATH: &str = "api/v2/language";
const STATUSES_PATH: &str = "api/v2/languages";

/// Language detection for one file.
#[derive(Debug, Clone)]
pub struct LanguageRequest {
    handle: RequestHandle,
    file_id: Option<String>,
}

impl LanguageRequest {
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
        let statuses: Vec<LanguageResult> = submit_jobs(client, SUBMIT_PATH, &body).await?;

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

    pub async fn get_statuses<I>(
        client: &DocAiClient,
        request_ids: I,
    ) -> DocAiResult<BatchStatuses<LanguageResult>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        get_statuses(client, STATUSES_PATH, request_ids).await
    }
}

#[async_trait]
impl PollStatus for LanguageRequest {
    type Status = LanguageResult;

    fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    async fn fetch_status(&self) -> DocAiResult<LanguageResult> {
        let path = format!("{SUBMIT_PATH}/{}", self.request_id());
        self.handle.client().get_json(&path, 200).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::clients::mock::{MockResponse, MockTransport};
    use crate::models::Status;

    #[tokio::test]
    async fn submission_keeps_failed_initial_status() {
        let mock = Arc::new(MockTransport::with_responses([MockResponse::json(
            202,
            json!({"file_ids": [
                {"request_id": "r1", "file_id": "f1", "status": "queued"},
                {
                    "request_id": "r2",
                    "file_id": "f2",
                    "status": "failed",
                    "error": {"code": "file_not_found", "message": "File f2 not found"}
                }
            ]}),
        )]));
        let client = DocAiClient::with_transport(mock);

        let requests = LanguageRequest::submit(&client, ["f1", "f2"]).await.unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].file_id(), Some("f1"));
        assert!(requests[0].handle().initial_error().is_none());
        assert!(requests[1].handle().initial_status().unwrap().is_failed());
        assert_eq!(requests[1].handle().initial_error().unwrap().code, "file_not_found");
    }

    #[tokio::test]
    async fn fetch_status_reads_language() {
        let mock = Arc::new(MockTransport::with_responses([MockResponse::json(
            200,
            json!({"request_id": "r1", "status": "complete", "language": "English"}),
        )]));
        let client = DocAiClient::with_transport(mock.clone());

        let result = LanguageRequest::from_id(client, "r1").fetch_status().await.unwrap();

        assert!(result.is_complete());
        assert_eq!(result.language.as_deref(), Some("English"));
        assert_eq!(mock.last_request().unwrap().path, "api/v2/language/r1");
    }
}
