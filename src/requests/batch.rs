use serde::de::DeserializeOwned;

use crate::clients::DocAiClient;
use crate::error::{DocAiError, DocAiResult};
use crate::models::BatchStatuses;
use crate::models::batch_status::BatchStatusesWire;
use crate::utils::repeated_query;

/// Looks up many requests of one kind in a single call.
///
/// `collection_path` is the plural status endpoint (`api/v2/ocrs`, ...).
/// Every identifier is sent as its own `request_id` query parameter;
/// duplicates are sent once. Identifiers the server could not resolve end
/// up in [`BatchStatuses::request_errors`]; only a failure of the call as a
/// whole is returned as an error.
pub async fn get_statuses<S, I>(
    client: &DocAiClient,
    collection_path: &str,
    request_ids: I,
) -> DocAiResult<BatchStatuses<S>>
where
    S: DeserializeOwned,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut ids: Vec<String> = Vec::new();
    for id in request_ids {
        let id = id.into();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(DocAiError::invalid_argument(
            "at least one request id is required",
        ));
    }

    let path = format!("{collection_path}?{}", repeated_query("request_id", &ids));
    let wire: BatchStatusesWire<S> = client.get_json(&path, 200).await?;
    Ok(BatchStatuses::from_wire(&ids, wire))
}
