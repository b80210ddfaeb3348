use serde::{Deserialize, Serialize};

/// One entry of the field listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub field_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_count: u64,
    #[serde(default)]
    pub bias: f32,
    #[serde(default)]
    pub precision: f32,
    #[serde(default)]
    pub recall: f32,
    #[serde(default)]
    pub f_score: f32,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_trained: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub field_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub is_trained: bool,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
    // Shape varies between server versions; kept as raw JSON.
    #[serde(default)]
    pub languages: Vec<serde_json::Value>,
    #[serde(default)]
    pub jurisdictions: Vec<Jurisdiction>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub normalization_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentType {
    #[serde(default)]
    pub classifications: Vec<String>,
    #[serde(default)]
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    #[serde(default)]
    pub country: Vec<Country>,
    #[serde(default)]
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldAccuracy {
    #[serde(default)]
    pub f_score: f32,
    #[serde(default)]
    pub precision: f32,
    #[serde(default)]
    pub recall: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub file_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub location: Vec<i64>,
}

/// Character span inside a training file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: u64,
    pub end: u64,
}

/// Spans a field should extract from one training file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub file_id: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl TrainingExample {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            locations: Vec::new(),
        }
    }

    pub fn with_location(mut self, start: u64, end: u64) -> Self {
        self.add_location(start, end);
        self
    }

    pub fn add_location(&mut self, start: u64, end: u64) {
        self.locations.push(Location { start, end });
    }
}
