//! Error types for request domain validation and parsing.

use super::{RequestId, RequestStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestDomainError {
    /// The location is empty after trimming.
    #[error("request location must not be empty")]
    EmptyLocation,

    /// The reserved interval ends before it starts.
    #[error("reservation end {end} must be after start {start}")]
    InvalidSchedule {
        /// Requested start of the reservation.
        start: DateTime<Utc>,
        /// Requested end of the reservation.
        end: DateTime<Utc>,
    },

    /// The requested status change is not permitted.
    #[error("request {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Request being transitioned.
        id: RequestId,
        /// Current status.
        from: RequestStatus,
        /// Requested status.
        to: RequestStatus,
    },
}

/// Error returned while parsing request statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);
