//! Fail-soft field decoding for request records.
//!
//! A record with a usable identifier is kept even when its optional fields
//! are malformed: such fields fall back to their defaults so the record still
//! takes part in grouping and conflict checks.

use serde::{Deserialize, Deserializer, de::IgnoredAny};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Decodes `T`, substituting `T::default()` for `null` or malformed input.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Valid(value)) => value,
        Some(Lenient::Invalid(_)) | None => T::default(),
    })
}

/// Decodes free text, mapping `null` and non-string values to an empty string.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    or_default(deserializer)
}
