//! Dashboard counters and trends.

use super::calendar::created_on;
use crate::request::domain::{Request, RequestStatus, RequestType};
use chrono::{Days, FixedOffset, NaiveDate};
use serde::Serialize;

/// Headline counters for the dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    /// Every request in the snapshot.
    pub total: usize,
    /// Requests waiting for triage.
    pub pending: usize,
    /// Requests with a technician.
    pub assigned: usize,
    /// Resolved requests.
    pub completed: usize,
    /// Requests created today.
    pub created_today: usize,
    /// Resolved requests that were created today.
    pub completed_today: usize,
}

impl RequestStats {
    /// Counts `requests`, treating `today` as seen from `offset`.
    #[must_use]
    pub fn compute(requests: &[Request], today: NaiveDate, offset: FixedOffset) -> Self {
        requests.iter().fold(Self::default(), |mut stats, request| {
            let is_today = created_on(request, today, offset);
            stats.total += 1;
            match request.status() {
                RequestStatus::Pending => stats.pending += 1,
                RequestStatus::Assigned => stats.assigned += 1,
                RequestStatus::Completed => {
                    stats.completed += 1;
                    if is_today {
                        stats.completed_today += 1;
                    }
                }
                RequestStatus::Rejected
                | RequestStatus::Cancelled
                | RequestStatus::CancellationRequested => {}
            }
            if is_today {
                stats.created_today += 1;
            }
            stats
        })
    }
}

/// Number of requests of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// The category.
    pub request_type: RequestType,
    /// Requests in the category.
    pub count: usize,
}

/// Counts requests per category, largest first.
///
/// Categories with equal counts keep the order in which they first appear.
#[must_use]
pub fn count_by_type(requests: &[Request]) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for request in requests {
        let request_type = request.request_type();
        match counts
            .iter_mut()
            .find(|entry| entry.request_type == request_type)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount {
                request_type,
                count: 1,
            }),
        }
    }
    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts
}

/// Number of requests created on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// The day.
    pub date: NaiveDate,
    /// Requests created that day.
    pub count: usize,
}

/// Counts requests per day for the `days` days ending with `today`, oldest
/// first.
#[must_use]
pub fn daily_trend(
    requests: &[Request],
    today: NaiveDate,
    days: u32,
    offset: FixedOffset,
) -> Vec<DailyCount> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| DailyCount {
            date,
            count: requests
                .iter()
                .filter(|request| created_on(request, date, offset))
                .count(),
        })
        .collect()
}
