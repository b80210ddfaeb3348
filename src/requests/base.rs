//! Shared lifecycle of an asynchronous server-side job: a request handle,
//! the status-fetch capability, and the bounded polling loop built on it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clients::DocAiClient;
use crate::error::{DocAiError, DocAiResult};
use crate::models::{ProcessingState, RequestError, Status};

/// Identity of a submitted job plus the client used to poll it.
///
/// The initial status and error are whatever the submission response carried
/// and never change afterwards. A handle rebuilt from a stored identifier has
/// neither.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    client: DocAiClient,
    request_id: String,
    initial_status: Option<ProcessingState>,
    initial_error: Option<RequestError>,
}

impl RequestHandle {
    pub(crate) fn submitted(client: DocAiClient, status: &impl Status) -> Self {
        Self {
            client,
            request_id: status.request_id().to_string(),
            initial_status: Some(status.state()),
            initial_error: status.error().cloned(),
        }
    }

    pub(crate) fn resumed(client: DocAiClient, request_id: impl Into<String>) -> Self {
        Self {
            client,
            request_id: request_id.into(),
            initial_status: None,
            initial_error: None,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn initial_status(&self) -> Option<ProcessingState> {
        self.initial_status
    }

    pub fn initial_error(&self) -> Option<&RequestError> {
        self.initial_error.as_ref()
    }

    pub fn client(&self) -> &DocAiClient {
        &self.client
    }
}

/// Polling parameters for [`PollStatus::wait_until_finished`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub polling_interval: Duration,
    pub timeout: Duration,
    /// Log every poll at `info` instead of `debug`.
    pub show_progress: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(300),
            show_progress: false,
        }
    }
}

impl WaitOptions {
    pub fn new(polling_interval: Duration, timeout: Duration) -> Self {
        Self {
            polling_interval,
            timeout,
            show_progress: false,
        }
    }

    /// Builds options from seconds, rejecting values that are not positive
    /// and finite.
    pub fn from_secs(polling_interval: f64, timeout: f64) -> DocAiResult<Self> {
        let to_duration = |name: &str, secs: f64| {
            if secs.is_finite() && secs > 0.0 {
                Ok(Duration::from_secs_f64(secs))
            } else {
                Err(DocAiError::invalid_argument(format!(
                    "{name} must be positive, got {secs}"
                )))
            }
        };
        Ok(Self::new(
            to_duration("polling interval", polling_interval)?,
            to_duration("timeout", timeout)?,
        ))
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn validate(&self) -> DocAiResult<()> {
        if self.polling_interval.is_zero() {
            return Err(DocAiError::invalid_argument("polling interval must be positive"));
        }
        if self.timeout.is_zero() {
            return Err(DocAiError::invalid_argument("timeout must be positive"));
        }
        Ok(())
    }
}

/// A job whose status can be fetched from the server.
///
/// Implementors only provide [`fetch_status`](PollStatus::fetch_status); the
/// waiting operations are shared.
#[async_trait]
pub trait PollStatus: Send + Sync {
    type Status: Status + Send;

    fn handle(&self) -> &RequestHandle;

    fn request_id(&self) -> &str {
        self.handle().request_id()
    }

    /// One round-trip to the status endpoint. Nothing is cached.
    async fn fetch_status(&self) -> DocAiResult<Self::Status>;

    /// Polls until the job is complete or failed, or the timeout passes.
    ///
    /// The first poll happens before any sleep. A failed job is returned as a
    /// status, not an error. On timeout the last, non-terminal status is
    /// returned. Transport and API errors end the wait immediately.
    async fn wait_until_finished(&self, options: WaitOptions) -> DocAiResult<Self::Status> {
        poll_until_finished(self, &options, None).await
    }

    /// Like [`wait_until_finished`](PollStatus::wait_until_finished), but a
    /// cancelled `token` ends the wait with [`DocAiError::Interrupted`].
    async fn wait_until_finished_or_cancelled(
        &self,
        options: WaitOptions,
        token: &CancellationToken,
    ) -> DocAiResult<Self::Status> {
        poll_until_finished(self, &options, Some(token)).await
    }
}

async fn poll_until_finished<P>(
    request: &P,
    options: &WaitOptions,
    token: Option<&CancellationToken>,
) -> DocAiResult<P::Status>
where
    P: PollStatus + ?Sized,
{
    options.validate()?;
    let request_id = request.request_id();
    let start = Instant::now();
    let mut polls = 0u32;

    loop {
        let status = request.fetch_status().await?;
        polls += 1;

        if options.show_progress {
            info!(request_id, polls, state = %status.state(), "Polled request status");
        } else {
            debug!(request_id, polls, state = %status.state(), "Polled request status");
        }

        if status.is_terminal() {
            info!(request_id, polls, state = %status.state(), "Request finished");
            return Ok(status);
        }

        if start.elapsed() >= options.timeout {
            warn!(
                request_id,
                polls,
                state = %status.state(),
                timeout_secs = options.timeout.as_secs_f64(),
                "Timed out waiting for request"
            );
            return Ok(status);
        }

        let sleep = tokio::time::sleep(options.polling_interval);
        match token {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        return Err(DocAiError::Interrupted {
                            request_id: request_id.to_string(),
                        });
                    }
                    _ = sleep => {}
                }
            }
            None => sleep.await,
        }
    }
}

/// Submission responses list one status per submitted file.
#[derive(Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
struct Submitted<S> {
    #[serde(alias = "statuses")]
    file_ids: Vec<S>,
}

#[derive(Serialize)]
pub(crate) struct FileIdsBody<'a> {
    pub file_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_ids: Option<&'a [String]>,
}

/// Collects identifiers, failing if there are none.
pub(crate) fn collect_ids<I>(ids: I, what: &str) -> DocAiResult<Vec<String>>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
    if ids.is_empty() {
        return Err(DocAiError::invalid_argument(format!(
            "at least one {what} is required"
        )));
    }
    Ok(ids)
}

/// Posts a job submission and returns the created statuses in server order.
pub(crate) async fn submit_jobs<S, B>(client: &DocAiClient, path: &str, body: &B) -> DocAiResult<Vec<S>>
where
    S: DeserializeOwned + Status,
    B: Serialize + ?Sized,
{
    let submitted: Submitted<S> = client.post_json(path, body, 202).await?;
    for status in &submitted.file_ids {
        debug!(path, request_id = status.request_id(), state = %status.state(), "Request submitted");
    }
    Ok(submitted.file_ids)
}

/// First request of a single-file submission.
pub(crate) fn first<T>(requests: Vec<T>, path: &str) -> DocAiResult<T> {
    requests
        .into_iter()
        .next()
        .ok_or_else(|| DocAiError::client(format!("POST {path} returned no requests")))
}

/// Waits on many requests at once, at most `max_concurrency` polling loops
/// at a time. Results come back in the order of `requests`.
pub async fn wait_all<P>(
    requests: &[P],
    options: WaitOptions,
    max_concurrency: usize,
) -> Vec<DocAiResult<P::Status>>
where
    P: PollStatus,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let tasks = requests.iter().map(|request| {
        let semaphore = semaphore.clone();
        async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| DocAiError::client_with_source("Concurrency limiter closed", e))?;
            request.wait_until_finished(options).await
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::RequestStatus;

    /// Replays a fixed sequence of states, repeating the last one.
    struct ScriptedRequest {
        handle: RequestHandle,
        script: Vec<ProcessingState>,
        polls: Mutex<usize>,
    }

    impl ScriptedRequest {
        fn new(script: &[ProcessingState]) -> Self {
            let client = DocAiClient::with_transport(Arc::new(
                crate::clients::mock::MockTransport::new(),
            ));
            Self {
                handle: RequestHandle::resumed(client, "req-1"),
                script: script.to_vec(),
                polls: Mutex::new(0),
            }
        }

        fn polls(&self) -> usize {
            *self.polls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PollStatus for ScriptedRequest {
        type Status = RequestStatus;

        fn handle(&self) -> &RequestHandle {
            &self.handle
        }

        async fn fetch_status(&self) -> DocAiResult<RequestStatus> {
            let mut polls = self.polls.lock().unwrap();
            let state = self.script[(*polls).min(self.script.len() - 1)];
            *polls += 1;
            Ok(RequestStatus::new("req-1", state))
        }
    }

    fn secs(interval: f64, timeout: f64) -> WaitOptions {
        WaitOptions::from_secs(interval, timeout).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn returns_complete_after_three_polls() {
        use ProcessingState::*;
        let request = ScriptedRequest::new(&[Processing, Processing, Complete]);
        let start = Instant::now();

        let status = request.wait_until_finished(secs(1.0, 60.0)).await.unwrap();

        assert!(status.is_complete());
        assert_eq!(request.polls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_completion_does_not_sleep() {
        let request = ScriptedRequest::new(&[ProcessingState::Complete]);
        let start = Instant::now();

        let status = request.wait_until_finished(secs(5.0, 60.0)).await.unwrap();

        assert!(status.is_complete());
        assert_eq!(request.polls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_job_is_returned_not_raised() {
        use ProcessingState::*;
        let request = ScriptedRequest::new(&[Queued, Failed]);

        let status = request.wait_until_finished(secs(1.0, 60.0)).await.unwrap();

        assert!(status.is_failed());
        assert_eq!(request.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_returns_last_status() {
        let request = ScriptedRequest::new(&[ProcessingState::Processing]);
        let start = Instant::now();

        let status = request.wait_until_finished(secs(1.0, 3.0)).await.unwrap();

        assert!(status.is_processing());
        assert_eq!(request.polls(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn unrecognized_state_keeps_polling() {
        use ProcessingState::*;
        let request = ScriptedRequest::new(&[Unrecognized, Unrecognized, Complete]);

        let status = request.wait_until_finished(secs(1.0, 60.0)).await.unwrap();

        assert!(status.is_complete());
        assert_eq!(request.polls(), 3);
    }

    #[tokio::test]
    async fn non_positive_parameters_are_rejected() {
        for (interval, timeout) in [(0.0, 10.0), (1.0, 0.0), (-1.0, 10.0), (f64::NAN, 1.0)] {
            let err = WaitOptions::from_secs(interval, timeout).unwrap_err();
            assert!(matches!(err, DocAiError::InvalidArgument { .. }));
        }

        let request = ScriptedRequest::new(&[ProcessingState::Complete]);
        let zero = WaitOptions::new(Duration::ZERO, Duration::from_secs(1));
        let err = request.wait_until_finished(zero).await.unwrap_err();
        assert!(matches!(err, DocAiError::InvalidArgument { .. }));
        assert_eq!(request.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_sleep() {
        let request = ScriptedRequest::new(&[ProcessingState::Processing]);
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            canceller.cancel();
        });

        let err = request
            .wait_until_finished_or_cancelled(secs(1.0, 60.0), &token)
            .await
            .unwrap_err();

        assert!(err.is_interrupted());
        assert!(!err.is_client_error());
        assert_eq!(request.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_all_keeps_input_order() {
        use ProcessingState::*;
        let requests = vec![
            ScriptedRequest::new(&[Processing, Processing, Complete]),
            ScriptedRequest::new(&[Failed]),
            ScriptedRequest::new(&[Queued, Complete]),
        ];

        let results = wait_all(&requests, secs(1.0, 60.0), 2).await;

        let states: Vec<_> = results.into_iter().map(|r| r.unwrap().state()).collect();
        assert_eq!(states, vec![Complete, Failed, Complete]);
    }
}
