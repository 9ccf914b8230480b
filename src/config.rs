//! Deployment configuration.
//!
//! Settings come from the process environment with defaults for every key:
//!
//! | Variable                         | Default                       |
//! |----------------------------------|-------------------------------|
//! | `CAMPUSDESK_AUTO_FORWARD_TYPES`  | `Facility Usage,Room Access`  |
//! | `CAMPUSDESK_LIST_LIMIT`          | `100`                         |
//! | `CAMPUSDESK_UTC_OFFSET_MINUTES`  | `0`                           |

use crate::request::domain::RequestType;
use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

/// Environment variable listing request types that skip intermediary triage.
pub const AUTO_FORWARD_TYPES_VAR: &str = "CAMPUSDESK_AUTO_FORWARD_TYPES";

/// Environment variable holding the default page size for request listings.
pub const LIST_LIMIT_VAR: &str = "CAMPUSDESK_LIST_LIMIT";

/// Environment variable holding the calendar's offset from UTC in minutes.
pub const UTC_OFFSET_MINUTES_VAR: &str = "CAMPUSDESK_UTC_OFFSET_MINUTES";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be interpreted.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Runtime configuration for the request services.
///
/// # Examples
///
/// ```
/// use campusdesk::config::DeskConfig;
/// use campusdesk::request::domain::RequestType;
///
/// let config = DeskConfig::default();
/// assert!(config.auto_forwards(RequestType::FacilityUsage));
/// assert!(!config.auto_forwards(RequestType::Cleaning));
/// assert_eq!(config.list_limit, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Request types assigned to technicians on submission.
    pub auto_forward_types: Vec<RequestType>,
    /// Page size used when a listing does not ask for one.
    pub list_limit: usize,
    /// Offset used to bucket timestamps into calendar days.
    pub utc_offset: FixedOffset,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            auto_forward_types: vec![RequestType::FacilityUsage, RequestType::RoomAccess],
            list_limit: 100,
            utc_offset: Utc.fix(),
        }
    }
}

impl DeskConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(AUTO_FORWARD_TYPES_VAR) {
            config.auto_forward_types = parse_types(&raw)?;
        }
        if let Some(raw) = lookup(LIST_LIMIT_VAR) {
            config.list_limit = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| invalid(LIST_LIMIT_VAR, &raw))?;
        }
        if let Some(raw) = lookup(UTC_OFFSET_MINUTES_VAR) {
            config.utc_offset = raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| invalid(UTC_OFFSET_MINUTES_VAR, &raw))?;
        }

        tracing::debug!(
            auto_forward = ?config.auto_forward_types,
            list_limit = config.list_limit,
            utc_offset = %config.utc_offset,
            "loaded desk configuration"
        );
        Ok(config)
    }

    /// Returns `true` when requests of `request_type` skip triage.
    #[must_use]
    pub fn auto_forwards(&self, request_type: RequestType) -> bool {
        self.auto_forward_types.contains(&request_type)
    }
}

fn parse_types(raw: &str) -> Result<Vec<RequestType>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| {
            RequestType::from_label(label).ok_or_else(|| invalid(AUTO_FORWARD_TYPES_VAR, label))
        })
        .collect()
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    }
}
