use serde::{Deserialize, Serialize};

/// Fields common to every normalization response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResults {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "sha-256", default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub value: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub precision: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDuration {
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyNormalization {
    #[serde(flatten)]
    pub base: NormalizationResults,
    #[serde(default)]
    pub currency: Vec<Currency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateNormalization {
    #[serde(flatten)]
    pub base: NormalizationResults,
    #[serde(default)]
    pub date: Vec<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationNormalization {
    #[serde(flatten)]
    pub base: NormalizationResults,
    #[serde(default)]
    pub duration: Vec<NormalizedDuration>,
}
