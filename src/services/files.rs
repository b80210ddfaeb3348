use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::clients::{DocAiClient, Method};
use crate::error::{DocAiError, DocAiResult};
use crate::models::SubmittedFile;
use crate::utils::get_content_type;

const FILES_PATH: &str = "api/v2/files";

/// Upload and deletion of documents.
#[derive(Debug, Clone)]
pub struct Files {
    client: DocAiClient,
}

impl Files {
    pub fn new(client: DocAiClient) -> Self {
        Self { client }
    }

    /// Uploads raw bytes. Without a content type the server sniffs one.
    pub async fn upload_bytes(
        &self,
        content: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> DocAiResult<SubmittedFile> {
        let file: SubmittedFile = self
            .client
            .request(Method::Post, FILES_PATH, content, content_type, 201)
            .await?;
        info!(file_id = %file.file_id, "File uploaded");
        Ok(file)
    }

    pub async fn upload_str(&self, content: &str, content_type: Option<&str>) -> DocAiResult<SubmittedFile> {
        self.upload_bytes(Bytes::copy_from_slice(content.as_bytes()), content_type)
            .await
    }

    /// Reads a file from disk and uploads it with a content type inferred
    /// from its extension.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> DocAiResult<SubmittedFile> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|e| {
            DocAiError::client_with_source(format!("Failed to read file {}", path.display()), e)
        })?;
        self.upload_bytes(content, Some(get_content_type(path))).await
    }

    pub async fn delete(&self, file_id: &str) -> DocAiResult<()> {
        self.client
            .delete(&format!("{FILES_PATH}/{file_id}"), 204)
            .await?;
        info!(file_id, "File deleted");
        Ok(())
    }
}
