//! HTTP transport abstraction.
//!
//! [`HttpTransport`] is the seam between the typed client and the wire: it
//! sends one authenticated call and hands back the raw status code and body.
//! [`ReqwestTransport`] is the production implementation.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::{DocAiError, DocAiResult};
use crate::models::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload plus the content type to send it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content: Bytes,
    pub content_type: Option<String>,
}

impl RequestBody {
    pub fn new(content: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    pub fn json(content: impl Into<Bytes>) -> Self {
        Self::new(content, Some("application/json"))
    }
}

/// Raw response: status code and body, nothing interpreted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Sends one authenticated call to the service.
///
/// `path` is relative to the configured base URL and may carry a query
/// string. Implementations must be safe to share between tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> DocAiResult<HttpResponse>;
}

/// Transport backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> DocAiResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token()))
            .map_err(|e| DocAiError::client_with_source("Token is not a valid header value", e))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("docai-client-rust/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> DocAiResult<HttpResponse> {
        let url = self.config.endpoint_url(path);
        let mut request = self.client.request(method.into(), &url);

        if let Some(body) = body {
            if let Some(content_type) = body.content_type.as_deref() {
                let value = HeaderValue::from_str(content_type).map_err(|e| {
                    DocAiError::client_with_source(
                        format!("Invalid content type '{content_type}'"),
                        e,
                    )
                })?;
                request = request.header(CONTENT_TYPE, value);
            }
            request = request.body(body.content);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}
