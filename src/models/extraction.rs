use serde::{Deserialize, Serialize};

/// Extractions found for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResults {
    pub field_id: String,
    #[serde(default)]
    pub extractions: Vec<ExtractionData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub spans: Vec<ExtractionSpan>,
}

/// Character offsets of an extraction in the OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSpan {
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub pages: Option<PageRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}
