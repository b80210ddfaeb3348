use std::fmt;

use serde::{Deserialize, Serialize};

use super::ProcessingState;

/// `{code, message}` reported by the server for a failed job or for a batch
/// lookup entry it could not resolve (for example `request_not_found`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl RequestError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Status of one asynchronous request.
///
/// Every poll produces a new value; nothing in the client updates a status in
/// place. Resource-specific results embed this struct (flattened on the wire)
/// and expose it through [`Status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestStatus {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub status: ProcessingState,
    /// Only populated when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RequestError>,
}

impl RequestStatus {
    pub fn new(request_id: impl Into<String>, status: ProcessingState) -> Self {
        Self {
            request_id: request_id.into(),
            status,
            error: None,
        }
    }

    pub fn with_error(mut self, error: RequestError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Read access to the lifecycle fields shared by every status and result type.
pub trait Status {
    fn request_status(&self) -> &RequestStatus;

    fn request_id(&self) -> &str {
        &self.request_status().request_id
    }

    fn state(&self) -> ProcessingState {
        self.request_status().status
    }

    fn error(&self) -> Option<&RequestError> {
        self.request_status().error.as_ref()
    }

    fn is_queued(&self) -> bool {
        self.state().is_queued()
    }

    fn is_processing(&self) -> bool {
        self.state().is_processing()
    }

    fn is_complete(&self) -> bool {
        self.state().is_complete()
    }

    fn is_failed(&self) -> bool {
        self.state().is_failed()
    }

    fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }
}

impl Status for RequestStatus {
    fn request_status(&self) -> &RequestStatus {
        self
    }
}
