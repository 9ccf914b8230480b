//! Dashboard filtering and technician work queues.

use super::{RequestGroup, calendar::created_on};
use crate::request::domain::{Request, RequestStatus};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Criteria for narrowing a grouped request list.
///
/// A group is kept when its root or any of its children satisfies every
/// criterion that is set.
///
/// # Examples
///
/// ```
/// use campusdesk::request::domain::RequestStatus;
/// use campusdesk::schedule::GroupFilter;
///
/// let filter = GroupFilter::new()
///     .with_status(RequestStatus::Pending)
///     .with_search("projector");
/// assert!(!filter.is_empty());
/// assert!(GroupFilter::new().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    status: Option<RequestStatus>,
    created_on: Option<NaiveDate>,
    search: String,
    offset: FixedOffset,
}

impl Default for GroupFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupFilter {
    /// Creates a filter that keeps everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: None,
            created_on: None,
            search: String::new(),
            offset: Utc.fix(),
        }
    }

    /// Keeps only requests in `status`.
    #[must_use]
    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only requests created on `day` as seen from `offset`.
    #[must_use]
    pub fn with_created_on(mut self, day: NaiveDate, offset: FixedOffset) -> Self {
        self.created_on = Some(day);
        self.offset = offset;
        self
    }

    /// Keeps only requests whose description, location or ID contains
    /// `text`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = text.trim().to_lowercase();
        self
    }

    /// Returns `true` when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.created_on.is_none() && self.search.is_empty()
    }

    /// Returns `true` when `request` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, request: &Request) -> bool {
        let status_matches = self.status.is_none_or(|status| request.status() == status);
        let date_matches = self
            .created_on
            .is_none_or(|day| created_on(request, day, self.offset));
        status_matches && date_matches && self.search_matches(request)
    }

    /// Returns `true` when the root or any child of `group` matches.
    #[must_use]
    pub fn matches_group(&self, group: &RequestGroup) -> bool {
        group.members().any(|request| self.matches(request))
    }

    /// Keeps the matching groups, preserving order.
    #[must_use]
    pub fn apply(&self, groups: Vec<RequestGroup>) -> Vec<RequestGroup> {
        groups
            .into_iter()
            .filter(|group| self.matches_group(group))
            .collect()
    }

    fn search_matches(&self, request: &Request) -> bool {
        if self.search.is_empty() {
            return true;
        }
        request.description().to_lowercase().contains(&self.search)
            || request.location().to_lowercase().contains(&self.search)
            || request.id().to_string().contains(&self.search)
    }
}

/// Groups split into the technician's open work and finished history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnicianQueues {
    /// Groups with at least one assigned request.
    pub active: Vec<RequestGroup>,
    /// Other groups with at least one completed or rejected request.
    pub history: Vec<RequestGroup>,
}

/// Splits groups into technician queues, preserving order.
///
/// Groups with nothing assigned, completed or rejected appear in neither
/// queue.
#[must_use]
pub fn technician_queues(groups: &[RequestGroup]) -> TechnicianQueues {
    let mut queues = TechnicianQueues::default();
    for group in groups {
        if group
            .members()
            .any(|request| request.status() == RequestStatus::Assigned)
        {
            queues.active.push(group.clone());
        } else if group.members().any(|request| {
            matches!(
                request.status(),
                RequestStatus::Completed | RequestStatus::Rejected
            )
        }) {
            queues.history.push(group.clone());
        }
    }
    queues
}
