use async_trait::async_trait;
use serde::Deserialize;

use super::base::{FileIdsBody, PollStatus, RequestHandle, collect_ids, first, submit_jobs};
use super::batch::get_statuses;
use crate::clients::DocAiClient;
use crate::error::DocAiResult;
use crate::models::{BatchStatuses, ExtractionResults, ExtractionStatus};

const SUBMIT_PATH: &str = "api/v2/extraction";
const STATUSES_PATH: &str = "api/v2/extractions";

#[derive(Deserialize)]
struct ResultsBody {
    #[serde(default)]
    results: Vec<ExtractionResults>,
}

/// Extraction of a set of fields from one file.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    handle: RequestHandle,
    file_id: Option<String>,
    field_ids: Vec<String>,
}

impl ExtractionRequest {
    /// Submits one extraction job per file, each extracting every field in
    /// `field_ids`.
    pub async fn submit<I, F>(client: &DocAiClient, file_ids: I, field_ids: F) -> DocAiResult<Vec<Self>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let file_ids = collect_ids(file_ids, "file id")?;
        let field_ids = collect_ids(field_ids, "field id")?;
        let body = FileIdsBody {
            file_ids: &file_ids,
            field_ids: Some(&field_ids),
        };
        let statuses: Vec<ExtractionStatus> = submit_jobs(client, SUBMIT_PATH, &body).await?;

        Ok(statuses
            .into_iter()
            .map(|status| {
                let handle = RequestHandle::submitted(client.clone(), &status);
                let field_ids = if status.field_ids.is_empty() {
                    field_ids.clone()
                } else {
                    status.field_ids
                };
                Self {
                    handle,
                    file_id: status.file_id,
                    field_ids,
                }
            })
            .collect())
    }

    pub async fn submit_one<F>(
        client: &DocAiClient,
        file_id: impl Into<String>,
        field_ids: F,
    ) -> DocAiResult<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let file_id: String = file_id.into();
        first(Self::submit(client, [file_id], field_ids).await?, SUBMIT_PATH)
    }

    pub fn from_id(client: DocAiClient, request_id: impl Into<String>) -> Self {
        Self {
            handle: RequestHandle::resumed(client, request_id),
            file_id: None,
            field_ids: Vec::new(),
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// Fields requested at submission. Empty for a resumed request.
    pub fn field_ids(&self) -> &[String] {
        &self.field_ids
    }

    pub async fn get_statuses<I>(
        client: &DocAiClient,
        request_ids: I,
    ) -> DocAiResult<BatchStatuses<ExtractionStatus>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        get_statuses(client, STATUSES_PATH, request_ids).await
    }

    /// Extracted text and spans, one entry per field.
    pub async fn results(&self) -> DocAiResult<Vec<ExtractionResults>> {
        let path = format!("{SUBMIT_PATH}/{}/results/text", self.request_id());
        let body: ResultsBody = self.handle.client().get_json(&path, 200).await?;
        Ok(body.results)
    }
}

#[async_trait]
impl PollStatus for ExtractionRequest {
    type Status = ExtractionStatus;

    fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    async fn fetch_status(&self) -> DocAiResult<ExtractionStatus> {
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
    use crate::error::DocAiError;

    #[tokio::test]
    async fn submit_sends_files_and_fields() {
        let mock = Arc::new(MockTransport::with_responses([MockResponse::json(
            202,
            json!({"file_ids": [{"request_id": "r1", "file_id": "f1", "status": "queued"}]}),
        )]));
        let client = DocAiClient::with_transport(mock.clone());

        let request = ExtractionRequest::submit_one(&client, "f1", ["title", "parties"])
            .await
            .unwrap();

        assert_eq!(request.field_ids(), ["title", "parties"]);
        assert_eq!(
            mock.last_request().unwrap().json_body(),
            Some(json!({"file_ids": ["f1"], "field_ids": ["title", "parties"]}))
        );
    }

    #[tokio::test]
    async fn field_ids_are_required() {
        let mock = Arc::new(MockTransport::new());
        let client = DocAiClient::with_transport(mock.clone());

        let err = ExtractionRequest::submit(&client, ["f1"], Vec::<String>::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DocAiError::InvalidArgument { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn results_parse_spans() {
        let mock = Arc::new(MockTransport::with_responses([MockResponse::json(
            200,
            json!({
                "request_id": "r1",
                "file_id": "f1",
                "results": [{
                    "field_id": "title",
                    "extractions": [{
                        "text": "Lease Agreement",
                        "spans": [{"start": 10, "end": 25, "pages": {"start": 1, "end": 1}}]
                    }]
                }]
            }),
        )]));
        let request = ExtractionRequest::from_id(DocAiClient::with_transport(mock.clone()), "r1");

        let results = request.results().await.unwrap();

        assert_eq!(mock.last_request().unwrap().path, "api/v2/extraction/r1/results/text");
        assert_eq!(results.len(), 1);
        let extraction = &results[0].extractions[0];
        assert_eq!(extraction.text.as_deref(), Some("Lease Agreement"));
        assert_eq!((extraction.spans[0].start, extraction.spans[0].end), (10, 25));
        assert_eq!(extraction.spans[0].pages.unwrap().start, 1);
    }
}
