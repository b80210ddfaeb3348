pub mod batch_status;
pub mod config;
pub mod extraction;
pub mod fields;
pub mod files;
pub mod normalization;
pub mod processing_state;
pub mod request_status;
pub mod results;

pub use batch_status::BatchStatuses;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use extraction::{ExtractionData, ExtractionResults, ExtractionSpan, PageRange};
pub use fields::{
    Country, DocumentType, FieldAccuracy, FieldMetadata, FieldSummary, FieldValidation,
    Jurisdiction, Location, TrainingExample,
};
pub use files::{FileAttributes, SubmittedFile};
pub use normalization::{
    Currency, CurrencyNormalization, Date, DateNormalization, DurationNormalization,
    NormalizationResults, NormalizedDuration,
};
pub use processing_state::ProcessingState;
pub use request_status::{RequestError, RequestStatus, Status};
pub use results::{
    ClassificationResult, ExtractionStatus, LanguageResult, MlcResult, OcrStatus, TrainingStatus,
};
