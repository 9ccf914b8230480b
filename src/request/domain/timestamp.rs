//! Lenient timestamp decoding.
//!
//! The request store emits RFC 3339 timestamps, but older records were
//! written as naive ISO 8601 strings without an offset. Naive values are read
//! as UTC. Anything unparseable decodes as an absent timestamp so that the
//! record drops out of date-based views instead of failing the snapshot.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an RFC 3339 or naive ISO 8601 timestamp.
pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    trimmed
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serde adapter for optional timestamps that never fails on bad input.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<TimestampRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(TimestampRepr::Text(raw)) => parse(&raw),
        Some(TimestampRepr::Other(_)) | None => None,
    })
}
