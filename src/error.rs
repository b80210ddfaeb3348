//! Error types for the document-AI client.
//!
//! Two kinds of failure surface as [`DocAiError`]: local failures to prepare,
//! send or parse a call (client errors) and responses whose status code is not
//! the one the operation expects (API errors). A job that the server reports
//! as failed is not an error; it is a successfully fetched status whose
//! [`ProcessingState`](crate::models::ProcessingState) is `Failed`.

use serde::Deserialize;
use thiserror::Error;

use crate::models::RequestError;

/// Placeholder used when an error response carries no `error.code`.
pub const MISSING_ERROR_CODE: &str = "Could not find code in response body";

/// Placeholder used when an error response carries no `error.message`.
pub const MISSING_ERROR_MESSAGE: &str = "Could not find message in response body";

/// Result type alias for client operations.
pub type DocAiResult<T> = Result<T, DocAiError>;

/// Error type for every operation that talks to the service.
#[derive(Debug, Error)]
pub enum DocAiError {
    /// The request could not be prepared or sent, or the connection failed.
    #[error("Client error: {message}")]
    Client {
        /// What went wrong.
        message: String,
        /// Underlying cause, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An argument was rejected before any request was sent.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Which argument and why.
        message: String,
    },

    /// A request body could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Serializer message.
        message: String,
    },

    /// A response body could not be parsed into the expected shape.
    #[error("Unable to parse response: {message}")]
    Deserialization {
        /// Parser message.
        message: String,
        /// The raw body that failed to parse.
        body: String,
    },

    /// The server answered with a status code other than the expected one.
    #[error("{method} {path} failed with status code {status_code}: {code}: {message}")]
    Api {
        /// HTTP method of the failed call.
        method: String,
        /// Path (relative to the base URL) of the failed call.
        path: String,
        /// Status code actually returned.
        status_code: u16,
        /// `error.code` from the response envelope, or a placeholder.
        code: String,
        /// `error.message` from the response envelope, or a placeholder.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// A wait was cancelled while sleeping between polls.
    #[error("Interrupted while waiting for request {request_id}")]
    Interrupted {
        /// The request that was being waited on.
        request_id: String,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

impl DocAiError {
    /// Creates a client error without an underlying cause.
    pub fn client(message: impl Into<String>) -> Self {
        DocAiError::Client {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a client error wrapping `source`.
    pub fn client_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DocAiError::Client {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an argument validation error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DocAiError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Builds an API error from a response, extracting `{code, message}` from
    /// the standard error envelope when the body follows it.
    pub fn api(method: &str, path: &str, status_code: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error);
        let (code, message) = match detail {
            Some(detail) => (detail.code, detail.message),
            None => (None, None),
        };

        DocAiError::Api {
            method: method.to_string(),
            path: path.to_string(),
            status_code,
            code: code.unwrap_or_else(|| MISSING_ERROR_CODE.to_string()),
            message: message.unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string()),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Returns true for [`DocAiError::Api`].
    pub fn is_api_error(&self) -> bool {
        matches!(self, DocAiError::Api { .. })
    }

    /// Returns true for every local failure (everything except API errors and
    /// interruptions).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DocAiError::Client { .. }
                | DocAiError::InvalidArgument { .. }
                | DocAiError::Serialization { .. }
                | DocAiError::Deserialization { .. }
        )
    }

    /// Returns true if a wait was cancelled.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, DocAiError::Interrupted { .. })
    }

    /// The status code of an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DocAiError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// The `{code, message}` pair of an API error.
    pub fn api_error(&self) -> Option<RequestError> {
        match self {
            DocAiError::Api { code, message, .. } => Some(RequestError {
                code: code.clone(),
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DocAiError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Http request timed out"
        } else if err.is_connect() {
            "Http connection failed"
        } else {
            "Http request failed"
        };
        DocAiError::client_with_source(message, err)
    }
}

impl From<std::io::Error> for DocAiError {
    fn from(err: std::io::Error) -> Self {
        DocAiError::client_with_source("I/O failure", err)
    }
}
