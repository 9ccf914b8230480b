//! Append-only request history.

use super::{lenient, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a request's lifecycle history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Short description of what happened, such as `Created`.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub action: String,
    /// Free-form note attached to the change.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub note: String,
    /// When the change was recorded, if known.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Creates an entry recorded at `timestamp`.
    #[must_use]
    pub fn new(action: impl Into<String>, note: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            action: action.into(),
            note: note.into(),
            timestamp: Some(timestamp),
        }
    }
}
