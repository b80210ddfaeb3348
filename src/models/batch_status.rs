use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::RequestError;

/// Code given to a requested identifier the server left out of its answer.
pub const REQUEST_NOT_FOUND: &str = "request_not_found";

/// Statuses of several requests fetched in one call.
///
/// Every requested identifier appears in exactly one of `statuses` or
/// `request_errors`, and `num_found + num_errors` equals the number of
/// distinct identifiers asked about. A per-identifier error is data, not a
/// failure of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStatuses<S> {
    pub num_found: usize,
    pub num_errors: usize,
    pub statuses: HashMap<String, S>,
    pub request_errors: HashMap<String, RequestError>,
}

/// Batch response body as sent by the server.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub(crate) struct BatchStatusesWire<S> {
    #[serde(default)]
    pub num_found: Option<usize>,
    #[serde(default)]
    pub num_errors: Option<usize>,
    #[serde(default)]
    pub errors: Option<HashMap<String, BatchErrorEntry>>,
    #[serde(default)]
    pub statuses: Option<HashMap<String, S>>,
}

/// Per-identifier errors come either bare or wrapped in an `error` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BatchErrorEntry {
    Wrapped { error: RequestError },
    Bare(RequestError),
}

impl From<BatchErrorEntry> for RequestError {
    fn from(entry: BatchErrorEntry) -> Self {
        match entry {
            BatchErrorEntry::Wrapped { error } => error,
            BatchErrorEntry::Bare(error) => error,
        }
    }
}

impl<S> BatchStatuses<S> {
    /// Partitions a server response against the identifiers that were asked
    /// about.
    ///
    /// An identifier reported as both found and failed keeps only its error.
    /// A requested identifier missing from both maps gets a
    /// [`REQUEST_NOT_FOUND`] error. Entries for identifiers that were not
    /// requested are dropped and the counts are recomputed from the maps.
    pub(crate) fn from_wire(requested: &[String], wire: BatchStatusesWire<S>) -> Self {
        let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();

        let mut request_errors: HashMap<String, RequestError> = wire
            .errors
            .unwrap_or_default()
            .into_iter()
            .filter(|(id, _)| requested.contains(id.as_str()))
            .map(|(id, entry)| (id, entry.into()))
            .collect();

        let statuses: HashMap<String, S> = wire
            .statuses
            .unwrap_or_default()
            .into_iter()
            .filter(|(id, _)| requested.contains(id.as_str()) && !request_errors.contains_key(id))
            .collect();

        for id in requested {
            if !statuses.contains_key(id) && !request_errors.contains_key(id) {
                request_errors.insert(
                    id.to_string(),
                    RequestError::new(
                        REQUEST_NOT_FOUND,
                        format!("No status was returned for request {id}"),
                    ),
                );
            }
        }

        if wire.num_found.is_some_and(|n| n != statuses.len())
            || wire.num_errors.is_some_and(|n| n != request_errors.len())
        {
            tracing::debug!(
                reported_found = wire.num_found,
                reported_errors = wire.num_errors,
                found = statuses.len(),
                errors = request_errors.len(),
                "Batch status counts adjusted to the requested identifiers"
            );
        }

        Self {
            num_found: statuses.len(),
            num_errors: request_errors.len(),
            statuses,
            request_errors,
        }
    }

    /// Number of identifiers covered by this result.
    pub fn len(&self) -> usize {
        self.num_found + self.num_errors
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self, request_id: &str) -> Option<&S> {
        self.statuses.get(request_id)
    }

    pub fn request_error(&self, request_id: &str) -> Option<&RequestError> {
        self.request_errors.get(request_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{ClassificationResult, RequestStatus, Status};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn four_classification_response() -> serde_json::Value {
        json!({
            "num_found": 3,
            "num_errors": 1,
            "errors": {
                "ce7m85s2nt5r5uan68hg": {
                    "error": {"code": "request_not_found", "message": "Request not found"}
                }
            },
            "statuses": {
                "ce7m85s2nt5r5uan68g0": {
                    "request_id": "ce7m85s2nt5r5uan68g0",
                    "status": "complete",
                    "classification": "Intellectual Property Agt",
                    "is_contract": true
                },
                "ce7m85s2nt5r5uan68gg": {
                    "request_id": "ce7m85s2nt5r5uan68gg",
                    "status": "processing"
                },
                "ce7m85s2nt5r5uan68h0": {
                    "request_id": "ce7m85s2nt5r5uan68h0",
                    "status": "complete",
                    "classification": "Intellectual Property Agt",
                    "is_contract": true
                }
            }
        })
    }

    #[test]
    fn partitions_found_and_failed_identifiers() {
        let requested = ids(&[
            "ce7m85s2nt5r5uan68g0",
            "ce7m85s2nt5r5uan68gg",
            "ce7m85s2nt5r5uan68h0",
            "ce7m85s2nt5r5uan68hg",
        ]);
        let wire: BatchStatusesWire<ClassificationResult> =
            serde_json::from_value(four_classification_response()).unwrap();
        let batch = BatchStatuses::from_wire(&requested, wire);

        assert_eq!(batch.num_found, 3);
        assert_eq!(batch.num_errors, 1);
        assert_eq!(
            batch.request_error("ce7m85s2nt5r5uan68hg").unwrap().code,
            "request_not_found"
        );
        assert!(batch.status("ce7m85s2nt5r5uan68hg").is_none());

        let first = batch.status("ce7m85s2nt5r5uan68g0").unwrap();
        assert!(first.is_complete());
        assert!(first.is_contract);
        assert_eq!(first.classification.as_deref(), Some("Intellectual Property Agt"));
        assert!(batch.status("ce7m85s2nt5r5uan68gg").unwrap().is_processing());

        for id in &requested[..3] {
            assert!(batch.request_error(id).is_none());
        }
        assert_eq!(batch.len(), requested.len());
    }

    #[test]
    fn bare_error_entries_are_accepted() {
        let wire: BatchStatusesWire<RequestStatus> = serde_json::from_value(json!({
            "num_found": 0,
            "num_errors": 1,
            "errors": {"a": {"code": "request_not_found", "message": "gone"}},
            "statuses": {}
        }))
        .unwrap();
        let batch = BatchStatuses::from_wire(&ids(&["a"]), wire);

        assert_eq!(batch.request_error("a").unwrap().message, "gone");
    }

    #[test]
    fn missing_identifier_gets_synthesized_error() {
        let wire: BatchStatusesWire<RequestStatus> = serde_json::from_value(json!({
            "num_found": 1,
            "num_errors": 0,
            "statuses": {"a": {"request_id": "a", "status": "queued"}}
        }))
        .unwrap();
        let batch = BatchStatuses::from_wire(&ids(&["a", "b"]), wire);

        assert_eq!(batch.num_found, 1);
        assert_eq!(batch.num_errors, 1);
        assert_eq!(batch.request_error("b").unwrap().code, REQUEST_NOT_FOUND);
    }

    #[test]
    fn identifier_in_both_maps_keeps_only_error() {
        let wire: BatchStatusesWire<RequestStatus> = serde_json::from_value(json!({
            "errors": {"a": {"code": "expired", "message": "Request expired"}},
            "statuses": {"a": {"request_id": "a", "status": "complete"}}
        }))
        .unwrap();
        let batch = BatchStatuses::from_wire(&ids(&["a"]), wire);

        assert!(batch.status("a").is_none());
        assert_eq!(batch.request_error("a").unwrap().code, "expired");
        assert_eq!((batch.num_found, batch.num_errors), (0, 1));
    }

    #[test]
    fn unrequested_entries_are_dropped() {
        let wire: BatchStatusesWire<RequestStatus> = serde_json::from_value(json!({
            "num_found": 2,
            "errors": null,
            "statuses": {
                "a": {"request_id": "a", "status": "complete"},
                "z": {"request_id": "z", "status": "complete"}
            }
        }))
        .unwrap();
        let batch = BatchStatuses::from_wire(&ids(&["a"]), wire);

        assert_eq!(batch.num_found, 1);
        assert!(batch.status("z").is_none());
        assert!(batch.request_errors.is_empty());
    }
}
