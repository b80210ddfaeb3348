//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use super::transport::{HttpResponse, HttpTransport, Method, RequestBody};
use crate::error::{DocAiError, DocAiResult};

/// A call the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
}

impl RecordedRequest {
    /// Body parsed as JSON, when there is one.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(&b.content).ok())
    }
}

/// A canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: Bytes,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: Bytes::from(body.to_string()),
        }
    }

    pub fn bytes(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    /// An error response in the service's `{"error": {code, message}}` envelope.
    pub fn error(status: u16, code: &str, message: &str) -> Self {
        Self::json(
            status,
            serde_json::json!({"error": {"code": code, "message": message}}),
        )
    }
}

/// Replays queued responses in order and records every call.
///
/// Once the queue is empty, the fallback response (if set) is returned for
/// every further call; without one, the call fails with a client error.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    fallback: Option<MockResponse>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        let mock = Self::new();
        for response in responses {
            mock.enqueue(response);
        }
        mock
    }

    pub fn with_fallback(mut self, response: MockResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    pub fn enqueue(&self, response: MockResponse) {
        locked(&self.responses).push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        locked(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        locked(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        locked(&self.requests).len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> DocAiResult<HttpResponse> {
        locked(&self.requests).push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        let next = locked(&self.responses)
            .pop_front()
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| DocAiError::client(format!("No mock response for {method} {path}")))?;

        Ok(HttpResponse {
            status: next.status,
            body: next.body,
        })
    }
}
