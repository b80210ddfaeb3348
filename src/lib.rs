//! Client for a document-AI REST service.
//!
//! Upload a document, submit background jobs against it (classification,
//! multi-level classification, language detection, OCR, field extraction,
//! field training), wait for them to finish and fetch their results.
//!
//! Every job type implements [`PollStatus`], which supplies the shared
//! polling loop:
//!
//! ```no_run
//! use docai_client::{ClassificationRequest, DocAiClient, Files, PollStatus, Status, WaitOptions};
//!
//! # async fn run() -> docai_client::DocAiResult<()> {
//! let client = DocAiClient::from_env()?;
//! let file = Files::new(client.clone()).upload_path("lease.pdf").await?;
//!
//! let request = ClassificationRequest::submit_one(&client, file.file_id.clone()).await?;
//! let result = request.wait_until_finished(WaitOptions::from_secs(2.0, 120.0)?).await?;
//! if result.is_complete() {
//!     println!("{:?} (contract: {})", result.classification, result.is_contract);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A job that the server reports as failed comes back as a status with
//! `is_failed() == true`, not as an error. Errors are reserved for calls that
//! could not be made or that the server rejected; see [`DocAiError`].

pub mod clients;
pub mod error;
pub mod models;
pub mod requests;
pub mod services;
pub mod utils;

pub use clients::{BlockingClient, DocAiClient, HttpTransport, ReqwestTransport};
pub use error::{DocAiError, DocAiResult};
pub use models::{
    BatchStatuses, ClientConfig, ProcessingState, RequestError, RequestStatus, Status,
};
pub use requests::{
    ClassificationRequest, ExtractionRequest, LanguageRequest, MlcRequest, OcrRequest,
    PollStatus, RequestHandle, TrainingRequest, WaitOptions, wait_all,
};
pub use services::{Fields, Files, Normalization};
pub use tokio_util::sync::CancellationToken;
pub use utils::init_tracing;
