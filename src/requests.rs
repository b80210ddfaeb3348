//! Asynchronous jobs: submission, status polling and results for each kind
//! of request the service runs in the background.

pub mod base;
pub mod batch;
pub mod classification;
pub mod extraction;
pub mod language;
pub mod mlc;
pub mod ocr;
pub mod training;

pub use base::{PollStatus, RequestHandle, WaitOptions, wait_all};
pub use batch::get_statuses;
pub use classification::ClassificationRequest;
pub use extraction::ExtractionRequest;
pub use language::LanguageRequest;
pub use mlc::MlcRequest;
pub use ocr::OcrRequest;
pub use training::TrainingRequest;
