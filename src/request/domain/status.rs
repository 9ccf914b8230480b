//! Request lifecycle status.

use super::ParseRequestStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Waiting for an intermediary to triage it.
    #[default]
    Pending,
    /// Forwarded to a technician.
    Assigned,
    /// Resolved by a technician.
    Completed,
    /// Turned down by an intermediary or technician.
    Rejected,
    /// Withdrawn by the submitter.
    Cancelled,
    /// The submitter asked for cancellation and awaits confirmation.
    CancellationRequested,
}

impl RequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::CancellationRequested => "cancellation_requested",
        }
    }

    /// Returns `true` when no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// Returns `true` when the request no longer holds its reservation.
    #[must_use]
    pub const fn releases_reservation(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Returns `true` when moving from `self` to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match self {
            Self::Pending => matches!(
                target,
                Self::Assigned | Self::Rejected | Self::CancellationRequested | Self::Cancelled
            ),
            Self::Assigned => matches!(
                target,
                Self::Completed | Self::Rejected | Self::CancellationRequested | Self::Cancelled
            ),
            Self::CancellationRequested => {
                matches!(target, Self::Cancelled | Self::Pending | Self::Assigned)
            }
            Self::Completed | Self::Rejected | Self::Cancelled => false,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ParseRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "cancellation_requested" => Ok(Self::CancellationRequested),
            _ => Err(ParseRequestStatusError(value.to_owned())),
        }
    }
}
