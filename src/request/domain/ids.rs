//! Identifier types for the request domain.
//!
//! The request store issues integer identifiers, but snapshots produced by
//! loosely typed clients sometimes carry them as numeric strings. Both forms
//! decode to the same identifier.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a request record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(i64);

impl RequestId {
    /// Creates a request identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = IdRepr::deserialize(deserializer)?
            .into_value()
            .map_err(serde::de::Error::custom)?;
        value
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("request id must not be empty"))
    }
}

/// Identifier of a user known to the request store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = IdRepr::deserialize(deserializer)?
            .into_value()
            .map_err(serde::de::Error::custom)?;
        value
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("user id must not be empty"))
    }
}

/// Wire forms accepted for identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl IdRepr {
    /// Resolves the identifier; blank text resolves to `None`.
    fn into_value(self) -> Result<Option<i64>, String> {
        match self {
            Self::Number(value) => Ok(Some(value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| format!("invalid identifier '{text}'"))
            }
        }
    }
}

/// Decodes an optional reference to a request.
///
/// `null`, a missing field, a blank string and any value that is not an
/// identifier all mean "no reference".
pub(crate) fn optional_request_id<'de, D>(deserializer: D) -> Result<Option<RequestId>, D::Error>
where
    D: Deserializer<'de>,
{
    decode_optional(deserializer).map(|value| value.map(RequestId))
}

/// Decodes an optional reference to a user.
pub(crate) fn optional_user_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    decode_optional(deserializer).map(|value| value.map(UserId))
}

fn decode_optional<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OptionalIdRepr>::deserialize(deserializer)? {
        Some(OptionalIdRepr::Valid(repr)) => repr.into_value().ok().flatten(),
        Some(OptionalIdRepr::Invalid(_)) | None => None,
    })
}

/// Wire forms accepted for optional identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionalIdRepr {
    Valid(IdRepr),
    Invalid(serde::de::IgnoredAny),
}
