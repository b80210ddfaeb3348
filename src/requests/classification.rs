use async_trait::async_trait;

use super::base::{FileIdsBody, PollStatus, RequestHandle, collect_ids, first, submit_jobs};
use super::batch::get_statuses;
use crate::clients::DocAiClient;
use crate::error::DocAiResult;
use crate::models::{BatchStatuses, ClassificationResult};

const SUBMIT_PATH: &str = "api/v2/classification";
const STATUSES_PATH: &str = "api/v2/classifications";

/// Document type classification of one file.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    handle: RequestHandle,
    file_id: Option<String>,
}

impl ClassificationRequest {
    /// Submits one classification job per file.
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
        let statuses: Vec<ClassificationResult> = submit_jobs(client, SUBMIT_PATH, &body).await?;

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

    /// Resumes tracking of an existing request.
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
    ) -> DocAiResult<BatchStatuses<ClassificationResult>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        get_statuses(client, STATUSES_PATH, request_ids).await
    }
}

#[async_trait]
impl PollStatus for ClassificationRequest {
    type Status = ClassificationResult;

    fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    async fn fetch_status(&self) -> DocAiResult<ClassificationResult> {
        let path = format!("{SUBMIT_PATH}/{}", self.request_id());
        self.handle.client().get_json(&path, 200).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::clients::Method;
    use crate::clients::mock::{MockResponse, MockTransport};
    use crate::models::{ProcessingState, Status};
    use crate::requests::WaitOptions;

    #[tokio::test(start_paused = true)]
    async fn submit_then_wait_for_classification() {
        let mock = Arc::new(MockTransport::with_responses([
            MockResponse::json(
                202,
                json!({"file_ids": [{
                    "request_id": "c5e43kf1qk1bstse6nrg",
                    "file_id": "c5e41av1qk1er7odm79g",
                    "status": "queued"
                }]}),
            ),
            MockResponse::json(
                200,
                json!({
                    "request_id": "c5e43kf1qk1bstse6nrg",
                    "file_id": "c5e41av1qk1er7odm79g",
                    "status": "complete",
                    "classification": "Real Estate Agt",
                    "is_contract": true
                }),
            ),
        ]));
        let client = DocAiClient::with_transport(mock.clone());

        let request = ClassificationRequest::submit_one(&client, "c5e41av1qk1er7odm79g")
            .await
            .unwrap();
        assert_eq!(request.request_id(), "c5e43kf1qk1bstse6nrg");
        assert_eq!(request.file_id(), Some("c5e41av1qk1er7odm79g"));
        assert_eq!(request.handle().initial_status(), Some(ProcessingState::Queued));

        let result = request
            .wait_until_finished(WaitOptions::from_secs(1.0, 30.0).unwrap())
            .await
            .unwrap();

        assert!(result.is_complete());
        assert_eq!(result.classification.as_deref(), Some("Real Estate Agt"));
        assert!(result.is_contract);

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "api/v2/classification");
        assert_eq!(
            requests[0].json_body(),
            Some(json!({"file_ids": ["c5e41av1qk1er7odm79g"]}))
        );
        assert_eq!(requests[1].path, "api/v2/classification/c5e43kf1qk1bstse6nrg");
    }

    #[tokio::test]
    async fn resumed_request_has_no_initial_status() {
        let client = DocAiClient::with_transport(Arc::new(MockTransport::new()));
        let request = ClassificationRequest::from_id(client, "abc");

        assert_eq!(request.request_id(), "abc");
        assert!(request.handle().initial_status().is_none());
        assert!(request.handle().initial_error().is_none());
    }

    #[tokio::test]
    async fn submit_without_files_is_rejected() {
        let mock = Arc::new(MockTransport::new());
        let client = DocAiClient::with_transport(mock.clone());

        let err = ClassificationRequest::submit(&client, Vec::<String>::new())
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(mock.request_count(), 0);
    }
}
