use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::transport::{HttpTransport, Method, ReqwestTransport, RequestBody};
use crate::error::{DocAiError, DocAiResult};
use crate::models::ClientConfig;

/// Authenticated, typed access to the document-AI REST API.
///
/// Every call names the status code it expects on success; any other code
/// becomes [`DocAiError::Api`]. Cloning is cheap and clones share the same
/// connection pool, so one client can serve any number of concurrent polls.
#[derive(Clone)]
pub struct DocAiClient {
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for DocAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocAiClient").finish_non_exhaustive()
    }
}

impl DocAiClient {
    pub fn new(config: ClientConfig) -> DocAiResult<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Builds a client from `DOCAI_URL` / `DOCAI_TOKEN` / `DOCAI_TIMEOUT`.
    pub fn from_env() -> DocAiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET, parsing a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, expected: u16) -> DocAiResult<T> {
        let body = self.send(Method::Get, path, None, expected).await?;
        parse_json(&body)
    }

    /// GET, returning the raw response bytes.
    pub async fn get_binary(&self, path: &str, expected: u16) -> DocAiResult<Bytes> {
        self.send(Method::Get, path, None, expected).await
    }

    /// POST a JSON body, parsing a JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, expected: u16) -> DocAiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = RequestBody::json(to_json(body)?);
        let response = self.send(Method::Post, path, Some(body), expected).await?;
        parse_json(&response)
    }

    /// Sends a raw body with an optional content type, parsing a JSON
    /// response. Used for uploads.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: impl Into<Bytes>,
        content_type: Option<&str>,
        expected: u16,
    ) -> DocAiResult<T> {
        let body = RequestBody::new(body, content_type);
        let response = self.send(method, path, Some(body), expected).await?;
        parse_json(&response)
    }

    /// PUT a JSON body to an endpoint that answers without content.
    pub async fn put_json_no_content<B>(&self, path: &str, body: &B, expected: u16) -> DocAiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let body = RequestBody::json(to_json(body)?);
        self.send(Method::Put, path, Some(body), expected).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, expected: u16) -> DocAiResult<()> {
        self.send(Method::Delete, path, None, expected).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        expected: u16,
    ) -> DocAiResult<Bytes> {
        debug!(method = %method, path, "Sending request");
        let response = self.transport.execute(method, path, body).await?;
        debug!(
            method = %method,
            path,
            status_code = response.status,
            expected,
            "Received response"
        );

        if response.status != expected {
            return Err(DocAiError::api(
                method.as_str(),
                path,
                response.status,
                &response.body,
            ));
        }
        Ok(response.body)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> DocAiResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| DocAiError::Serialization {
        message: e.to_string(),
    })
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> DocAiResult<T> {
    serde_json::from_slice(body).map_err(|e| DocAiError::Deserialization {
        message: e.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
