use async_trait::async_trait;

use super::base::{PollStatus, RequestHandle};
use crate::clients::DocAiClient;
use crate::error::{DocAiError, DocAiResult};
use crate::models::{TrainingExample, TrainingStatus};

/// Training of a new version of a custom field.
#[derive(Debug, Clone)]
pub struct TrainingRequest {
    handle: RequestHandle,
    field_id: String,
}

fn train_path(field_id: &str) -> String {
    format!("api/v2/fields/{field_id}/train")
}

impl TrainingRequest {
    /// Starts training `field_id` on the given examples.
    pub async fn submit(
        client: &DocAiClient,
        field_id: &str,
        examples: &[TrainingExample],
    ) -> DocAiResult<Self> {
        if field_id.trim().is_empty() {
            return Err(DocAiError::invalid_argument("field id must not be empty"));
        }
        if examples.is_empty() {
            return Err(DocAiError::invalid_argument(
                "at least one training example is required",
            ));
        }

        let status: TrainingStatus = client.post_json(&train_path(field_id), examples, 202).await?;
        tracing::debug!(field_id, request_id = %status.base.request_id, "Training submitted");

        Ok(Self {
            handle: RequestHandle::submitted(client.clone(), &status),
            field_id: field_id.to_string(),
        })
    }

    pub fn from_id(
        client: DocAiClient,
        field_id: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            handle: RequestHandle::resumed(client, request_id),
            field_id: field_id.into(),
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }
}

#[async_trait]
impl PollStatus for TrainingRequest {
    type Status = TrainingStatus;

    fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    async fn fetch_status(&self) -> DocAiResult<TrainingStatus> {
        let path = format!("{}/{}", train_path(&self.field_id), self.request_id());
        self.handle.client().get_json(&path, 200).await
    }
}
