//! Calendar day bucketing and the per-day overview.

use super::{Conflict, RequestGroup, detect_conflicts, group_requests};
use crate::request::domain::Request;
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

/// Everything the calendar shows for one selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOverview {
    /// The selected day.
    pub day: NaiveDate,
    /// Number of active bookings created that day.
    pub total: usize,
    /// The day's bookings grouped by parent.
    pub groups: Vec<RequestGroup>,
    /// Collisions among the day's bookings.
    pub conflicts: Vec<Conflict>,
}

/// Returns the facility-usage requests that still hold their reservation.
#[must_use]
pub fn facility_requests(requests: &[Request]) -> Vec<Request> {
    requests
        .iter()
        .filter(|request| request.is_active_booking())
        .cloned()
        .collect()
}

/// Returns the requests created on `day` as seen from `offset`.
///
/// Requests without a creation timestamp never fall on any day.
#[must_use]
pub fn requests_on_day(requests: &[Request], day: NaiveDate, offset: FixedOffset) -> Vec<Request> {
    requests
        .iter()
        .filter(|request| created_on(request, day, offset))
        .cloned()
        .collect()
}

/// Builds the calendar overview for `day`.
#[must_use]
pub fn day_overview(requests: &[Request], day: NaiveDate, offset: FixedOffset) -> DayOverview {
    let day_bookings = requests_on_day(&facility_requests(requests), day, offset);
    DayOverview {
        day,
        total: day_bookings.len(),
        groups: group_requests(&day_bookings),
        conflicts: detect_conflicts(&day_bookings),
    }
}

pub(crate) fn created_on(request: &Request, day: NaiveDate, offset: FixedOffset) -> bool {
    request
        .created_at()
        .is_some_and(|created| created.with_timezone(&offset).date_naive() == day)
}
