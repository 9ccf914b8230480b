//! Decoding of request snapshots served by the request API.
//!
//! Views are recomputed from whole snapshots, so one malformed record must not
//! hide the rest. Decoding is fail-soft: a payload that is not an array
//! yields no requests, and array elements that do not decode are skipped.

use crate::request::domain::Request;
use serde::Deserialize;
use serde_json::Value;

/// Decodes every well-formed request in `value`.
#[must_use]
pub fn parse_snapshot(value: &Value) -> Vec<Request> {
    let Some(items) = value.as_array() else {
        tracing::debug!("request snapshot is not an array; treating it as empty");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| match Request::deserialize(item) {
            Ok(request) => Some(request),
            Err(err) => {
                tracing::debug!(position, error = %err, "skipping malformed request record");
                None
            }
        })
        .collect()
}

/// Decodes a snapshot from raw JSON text.
///
/// Text that is not valid JSON is treated like any other unusable payload.
#[must_use]
pub fn parse_snapshot_str(raw: &str) -> Vec<Request> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => parse_snapshot(&value),
        Err(err) => {
            tracing::debug!(error = %err, "request snapshot is not valid JSON");
            Vec::new()
        }
    }
}
