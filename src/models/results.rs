//! Resource-specific status types. Each one is a [`RequestStatus`] plus the
//! payload fields the server returns for that kind of job.

use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::impl_status;

/// Document type classification of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub file_id: Option<String>,
    /// Present once the request is complete.
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub is_contract: bool,
}

/// Multi-level classification of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlcResult {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub classifications: Vec<String>,
}

/// Detected language of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageResult {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrStatus {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStatus {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub field_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStatus {
    #[serde(flatten)]
    pub base: RequestStatus,
    #[serde(default)]
    pub field_id: Option<String>,
}

impl_status!(
    ClassificationResult,
    MlcResult,
    LanguageResult,
    OcrStatus,
    ExtractionStatus,
    TrainingStatus,
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{ProcessingState, Status};

    #[test]
    fn classification_result_reads_payload_and_status() {
        let result: ClassificationResult = serde_json::from_value(json!({
            "file_id": "c5e41av1qk1er7odm79g",
            "request_id": "c5e43kf1qk1bstse6nrg",
            "status": "complete",
            "classification": "Real Estate Agt",
            "is_contract": true
        }))
        .unwrap();

        assert!(result.is_complete());
        assert_eq!(result.request_id(), "c5e43kf1qk1bstse6nrg");
        assert_eq!(result.classification.as_deref(), Some("Real Estate Agt"));
        assert!(result.is_contract);
    }

    #[test]
    fn queued_classification_has_no_payload() {
        let result: ClassificationResult = serde_json::from_value(json!({
            "file_id": "c5e41av1qk1er7odm79g",
            "request_id": "c5e43kf1qk1bstse6nrg",
            "status": "queued"
        }))
        .unwrap();

        assert!(result.is_queued());
        assert_eq!(result.classification, None);
        assert!(!result.is_contract);
    }

    #[test]
    fn unknown_state_inside_flattened_status() {
        let result: ExtractionStatus = serde_json::from_value(json!({
            "request_id": "r1",
            "status": "validating",
            "field_ids": ["f1", "f2"]
        }))
        .unwrap();

        assert_eq!(result.state(), ProcessingState::Unrecognized);
        assert_eq!(result.field_ids, vec!["f1", "f2"]);
    }

    #[test]
    fn mlc_result_lists_classifications() {
        let result: MlcResult = serde_json::from_value(json!({
            "request_id": "r2",
            "status": "complete",
            "classifications": ["Agreement", "Lease"]
        }))
        .unwrap();

        assert_eq!(result.classifications, vec!["Agreement", "Lease"]);
    }
}
