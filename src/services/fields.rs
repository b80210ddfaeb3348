use serde::{Deserialize, Serialize};

use crate::clients::DocAiClient;
use crate::error::{DocAiError, DocAiResult};
use crate::models::{FieldAccuracy, FieldMetadata, FieldSummary, FieldValidation, TrainingExample};
use crate::requests::TrainingRequest;

const FIELDS_PATH: &str = "api/v2/fields";

#[derive(Serialize)]
struct CreateFieldBody<'a> {
    field_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreatedField {
    field_id: String,
}

#[derive(Serialize)]
struct MetadataUpdate<'a> {
    name: &'a str,
    description: &'a str,
}

/// Listing, creation and inspection of extraction fields.
#[derive(Debug, Clone)]
pub struct Fields {
    client: DocAiClient,
}

impl Fields {
    pub fn new(client: DocAiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> DocAiResult<Vec<FieldSummary>> {
        self.client.get_json(FIELDS_PATH, 200).await
    }

    /// Creates a custom field and returns its id.
    pub async fn create(&self, name: &str, description: Option<&str>) -> DocAiResult<String> {
        if name.trim().is_empty() {
            return Err(DocAiError::invalid_argument("field name must not be empty"));
        }
        let body = CreateFieldBody {
            field_name: name,
            description,
        };
        let created: CreatedField = self.client.post_json(FIELDS_PATH, &body, 201).await?;
        Ok(created.field_id)
    }

    pub async fn metadata(&self, field_id: &str) -> DocAiResult<FieldMetadata> {
        self.client
            .get_json(&format!("{FIELDS_PATH}/{field_id}/metadata"), 200)
            .await
    }

    pub async fn update_metadata(&self, field_id: &str, name: &str, description: &str) -> DocAiResult<()> {
        let body = MetadataUpdate { name, description };
        self.client
            .put_json_no_content(&format!("{FIELDS_PATH}/{field_id}/metadata"), &body, 204)
            .await
    }

    pub async fn accuracy(&self, field_id: &str) -> DocAiResult<FieldAccuracy> {
        self.client
            .get_json(&format!("{FIELDS_PATH}/{field_id}/accuracy"), 200)
            .await
    }

    pub async fn validation_details(&self, field_id: &str) -> DocAiResult<Vec<FieldValidation>> {
        self.client
            .get_json(&format!("{FIELDS_PATH}/{field_id}/validation-details"), 200)
            .await
    }

    /// Starts training a new version of the field.
    pub async fn train(&self, field_id: &str, examples: &[TrainingExample]) -> DocAiResult<TrainingRequest> {
        TrainingRequest::submit(&self.client, field_id, examples).await
    }
}
