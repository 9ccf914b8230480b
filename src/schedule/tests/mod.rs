//! Unit tests for the derived request views.


use crate::request::domain::{
    PersistedRequestData, Request, RequestId, RequestStatus, RequestType, UserId,
};
use chrono::{DateTime, Utc};

/// Builds snapshot records with only the fields a test cares about.
pub(super) struct RequestBuilder {
    data: PersistedRequestData,
}

impl RequestBuilder {
    /// Starts a pending facility booking for "Room X" with no owner.
    pub(super) fn new(id: i64) -> Self {
        Self {
            data: PersistedRequestData {
                request_type: RequestType::FacilityUsage,
                location: "Room X".to_owned(),
                ..PersistedRequestData::new(RequestId::new(id))
            },
        }
    }

    pub(super) fn parent(mut self, id: i64) -> Self {
        self.data.parent_id = Some(RequestId::new(id));
        self
    }

    pub(super) fn owner(mut self, id: i64) -> Self {
        self.data.created_by_id = Some(UserId::new(id));
        self
    }

    pub(super) fn location(mut self, location: &str) -> Self {
        self.data.location = location.to_owned();
        self
    }

    pub(super) fn status(mut self, status: RequestStatus) -> Self {
        self.data.status = status;
        self
    }

    pub(super) fn kind(mut self, request_type: RequestType) -> Self {
        self.data.request_type = request_type;
        self
    }

    pub(super) fn created(mut self, rfc3339: &str) -> Self {
        self.data.created_at = Some(at(rfc3339));
        self
    }

    pub(super) fn description(mut self, text: &str) -> Self {
        self.data.description = text.to_owned();
        self
    }

    pub(super) fn build(self) -> Request {
        Request::from_persisted(self.data)
    }
}

/// Parses a fixed RFC 3339 timestamp.
pub(super) fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid test timestamp")
        .with_timezone(&Utc)
}

/// Collects request IDs for compact assertions.
pub(super) fn ids<'a>(requests: impl IntoIterator<Item = &'a Request>) -> Vec<i64> {
    requests
        .into_iter()
        .map(|request| request.id().value())
        .collect()
}
