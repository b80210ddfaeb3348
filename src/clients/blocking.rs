use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use super::DocAiClient;
use crate::error::{DocAiError, DocAiResult};
use crate::models::ClientConfig;
use crate::requests::{PollStatus, WaitOptions, wait_all};

/// Synchronous facade for callers outside an async runtime.
///
/// Owns a multi-threaded tokio runtime and drives the async operations on it.
/// Must not be used from inside another runtime: `block_on` panics there.
pub struct BlockingClient {
    client: DocAiClient,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> DocAiResult<Self> {
        Self::with_client(DocAiClient::new(config)?)
    }

    pub fn from_env() -> DocAiResult<Self> {
        Self::with_client(DocAiClient::from_env()?)
    }

    pub fn with_client(client: DocAiClient) -> DocAiResult<Self> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("docai-client")
            .build()
            .map_err(|e| DocAiError::client_with_source("Failed to start async runtime", e))?;
        Ok(Self { client, runtime })
    }

    /// The async client, for building requests to pass to [`block_on`](Self::block_on).
    pub fn client(&self) -> &DocAiClient {
        &self.client
    }

    /// Runs any client future to completion on the owned runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn fetch_status<P: PollStatus>(&self, request: &P) -> DocAiResult<P::Status> {
        self.block_on(request.fetch_status())
    }

    /// Blocks the calling thread until the request finishes or the timeout
    /// passes.
    pub fn wait_until_finished<P: PollStatus>(
        &self,
        request: &P,
        options: WaitOptions,
    ) -> DocAiResult<P::Status> {
        self.block_on(request.wait_until_finished(options))
    }

    pub fn wait_all<P: PollStatus>(
        &self,
        requests: &[P],
        options: WaitOptions,
        max_concurrency: usize,
    ) -> Vec<DocAiResult<P::Status>> {
        self.block_on(wait_all(requests, options, max_concurrency))
    }
}
