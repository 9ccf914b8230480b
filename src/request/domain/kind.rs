//! Request categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a request, drawn from a fixed vocabulary.
///
/// Labels are matched case-insensitively and also accepted in `snake_case`.
/// Labels outside the vocabulary fall back to [`RequestType::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    /// Reservation of a room or facility for a period of time.
    FacilityUsage,
    /// Unlocking a room.
    RoomAccess,
    /// Repair of broken equipment.
    EquipmentRepair,
    /// Cleaning of a location.
    Cleaning,
    /// Security concerns.
    Security,
    /// Anything else.
    #[default]
    Other,
}

impl RequestType {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::FacilityUsage,
        Self::RoomAccess,
        Self::EquipmentRepair,
        Self::Cleaning,
        Self::Security,
        Self::Other,
    ];

    /// Returns the display label used on the wire.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FacilityUsage => "Facility Usage",
            Self::RoomAccess => "Room Access",
            Self::EquipmentRepair => "Equipment Repair",
            Self::Cleaning => "Cleaning",
            Self::Security => "Security",
            Self::Other => "Other",
        }
    }

    /// Resolves a label, returning `None` for labels outside the vocabulary.
    #[must_use]
    pub fn from_label(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for RequestType {
    fn from(value: &str) -> Self {
        Self::from_label(value).unwrap_or_default()
    }
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RequestType> for String {
    fn from(value: RequestType) -> Self {
        value.label().to_owned()
    }
}
