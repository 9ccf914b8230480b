//! Request aggregate root and submission payloads.

use super::{
    Actor, HistoryEntry, RequestDomainError, RequestId, RequestStatus, RequestType, UserId, ids,
    lenient, timestamp,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated payload for a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    request_type: RequestType,
    location: String,
    description: String,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl RequestDraft {
    /// Creates a draft with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::EmptyLocation`] when the location is
    /// blank.
    pub fn new(
        request_type: RequestType,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, RequestDomainError> {
        let raw_location = location.into();
        let trimmed = raw_location.trim();
        if trimmed.is_empty() {
            return Err(RequestDomainError::EmptyLocation);
        }
        Ok(Self {
            request_type,
            location: trimmed.to_owned(),
            description: description.into(),
            start_time: None,
            end_time: None,
        })
    }

    /// Attaches a reserved interval.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::InvalidSchedule`] unless `end` is after
    /// `start`.
    pub fn with_schedule(
        mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, RequestDomainError> {
        if end <= start {
            return Err(RequestDomainError::InvalidSchedule { start, end });
        }
        self.start_time = Some(start);
        self.end_time = Some(end);
        Ok(self)
    }

    /// Returns the request category.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Returns the trimmed location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Request aggregate root.
///
/// Records decoded from the request store are accepted leniently: missing or
/// malformed optional fields take their defaults and unparseable timestamps
/// are treated as absent. Only the `id` must be usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    id: RequestId,
    #[serde(default, deserialize_with = "ids::optional_request_id")]
    parent_id: Option<RequestId>,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    request_type: RequestType,
    #[serde(default, deserialize_with = "lenient::or_default")]
    status: RequestStatus,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    location: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    description: String,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "ids::optional_user_id")]
    created_by_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    rejection_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    history: Vec<HistoryEntry>,
}

/// Parameter object for reconstructing a persisted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRequestData {
    /// Persisted request identifier.
    pub id: RequestId,
    /// Parent request, if this is a sub-request.
    pub parent_id: Option<RequestId>,
    /// Request category.
    pub request_type: RequestType,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Free-text location.
    pub location: String,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp, if known.
    pub created_at: Option<DateTime<Utc>>,
    /// Start of the reserved interval.
    pub start_time: Option<DateTime<Utc>>,
    /// End of the reserved interval.
    pub end_time: Option<DateTime<Utc>>,
    /// Submitting user, if known.
    pub created_by_id: Option<UserId>,
    /// Reason given when the request was rejected.
    pub rejection_reason: Option<String>,
    /// Lifecycle history, oldest first.
    pub history: Vec<HistoryEntry>,
}

impl PersistedRequestData {
    /// Creates data for a pending root request of category `Other` with every
    /// optional field empty.
    #[must_use]
    pub const fn new(id: RequestId) -> Self {
        Self {
            id,
            parent_id: None,
            request_type: RequestType::Other,
            status: RequestStatus::Pending,
            location: String::new(),
            description: String::new(),
            created_at: None,
            start_time: None,
            end_time: None,
            created_by_id: None,
            rejection_reason: None,
            history: Vec::new(),
        }
    }
}

impl Request {
    /// Creates a new pending request submitted by `actor`.
    ///
    /// The history starts with a `Created` entry naming the submitter.
    #[must_use]
    pub fn submit(
        id: RequestId,
        parent_id: Option<RequestId>,
        draft: RequestDraft,
        actor: &Actor,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let created = HistoryEntry::new(
            "Created",
            format!("Request created by {}", actor.full_name()),
            timestamp,
        );

        Self {
            id,
            parent_id,
            request_type: draft.request_type,
            status: RequestStatus::Pending,
            location: draft.location,
            description: draft.description,
            created_at: Some(timestamp),
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_by_id: Some(actor.id()),
            rejection_reason: None,
            history: vec![created],
        }
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRequestData) -> Self {
        Self {
            id: data.id,
            parent_id: data.parent_id,
            request_type: data.request_type,
            status: data.status,
            location: data.location,
            description: data.description,
            created_at: data.created_at,
            start_time: data.start_time,
            end_time: data.end_time,
            created_by_id: data.created_by_id,
            rejection_reason: data.rejection_reason,
            history: data.history,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the parent request, if this is a sub-request.
    #[must_use]
    pub const fn parent_id(&self) -> Option<RequestId> {
        self.parent_id
    }

    /// Returns `true` for requests without a parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the request category.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the location as submitted.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the start of the reserved interval.
    #[must_use]
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Returns the end of the reserved interval.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns the submitting user, if known.
    #[must_use]
    pub const fn created_by_id(&self) -> Option<UserId> {
        self.created_by_id
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the lifecycle history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns `true` for facility reservations that still hold their slot.
    #[must_use]
    pub const fn is_active_booking(&self) -> bool {
        matches!(self.request_type, RequestType::FacilityUsage)
            && !self.status.releases_reservation()
    }

    /// Forwards a freshly submitted request straight to technicians.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::InvalidStatusTransition`] unless the
    /// request is pending.
    pub fn auto_forward(&mut self, clock: &impl Clock) -> Result<(), RequestDomainError> {
        self.move_to(RequestStatus::Assigned)?;
        self.record(
            "Auto-Forwarded",
            "System auto-forwarded to Technician due to request type",
            clock,
        );
        Ok(())
    }

    /// Moves the request to `target`, recording the change in the history.
    ///
    /// A note given with a rejection is also kept as the rejection reason.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::InvalidStatusTransition`] when the
    /// status machine does not permit the change.
    pub fn transition_to(
        &mut self,
        target: RequestStatus,
        note: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), RequestDomainError> {
        self.move_to(target)?;
        if target == RequestStatus::Rejected
            && let Some(reason) = note
        {
            self.rejection_reason = Some(reason.to_owned());
        }
        self.record(
            format!("Status changed to {target}"),
            note.unwrap_or("Status updated via API"),
            clock,
        );
        Ok(())
    }

    /// Cancels the request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestDomainError::InvalidStatusTransition`] when the
    /// request is already terminal.
    pub fn cancel(&mut self, note: &str, clock: &impl Clock) -> Result<(), RequestDomainError> {
        self.move_to(RequestStatus::Cancelled)?;
        self.record("Cancelled", note, clock);
        Ok(())
    }

    fn move_to(&mut self, target: RequestStatus) -> Result<(), RequestDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(RequestDomainError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn record(&mut self, action: impl Into<String>, note: impl Into<String>, clock: &impl Clock) {
        self.history
            .push(HistoryEntry::new(action, note, clock.utc()));
    }
}
