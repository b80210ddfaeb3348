use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::clients::DocAiClient;
use crate::error::DocAiResult;
use crate::models::{CurrencyNormalization, DateNormalization, DurationNormalization};

#[derive(Serialize)]
struct NormalizationBody<'a> {
    text: &'a str,
}

/// Turns free text into structured currency, date and duration values.
/// These calls answer immediately; there is nothing to poll.
#[derive(Debug, Clone)]
pub struct Normalization {
    client: DocAiClient,
}

impl Normalization {
    pub fn new(client: DocAiClient) -> Self {
        Self { client }
    }

    pub async fn currency(&self, text: &str) -> DocAiResult<CurrencyNormalization> {
        self.normalize("currency", text).await
    }

    pub async fn date(&self, text: &str) -> DocAiResult<DateNormalization> {
        self.normalize("date", text).await
    }

    pub async fn duration(&self, text: &str) -> DocAiResult<DurationNormalization> {
        self.normalize("duration", text).await
    }

    async fn normalize<T: DeserializeOwned>(&self, kind: &str, text: &str) -> DocAiResult<T> {
        let path = format!("api/v2/normalization/{kind}");
        self.client.post_json(&path, &NormalizationBody { text }, 200).await
    }
}
