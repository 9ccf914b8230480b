//! Read-side service that derives dashboard views from the request store.

use crate::config::DeskConfig;
use crate::request::ports::{RequestRepository, RequestRepositoryResult};
use crate::schedule::{
    DailyCount, DayOverview, GroupFilter, RequestGroup, RequestStats, TechnicianQueues, TypeCount,
    count_by_type, daily_trend, day_overview, group_requests, technician_queues,
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Number of days covered by the dashboard trend.
pub const TREND_DAYS: u32 = 7;

/// Counters and charts for the triage dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Headline counters.
    pub stats: RequestStats,
    /// Requests per category, largest first.
    pub by_type: Vec<TypeCount>,
    /// Requests per day over the last [`TREND_DAYS`] days, oldest first.
    pub trend: Vec<DailyCount>,
}

/// Computes views over a fresh snapshot on every call.
#[derive(Clone)]
pub struct RequestViewService<R, C>
where
    R: RequestRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: Arc<DeskConfig>,
}

impl<R, C> RequestViewService<R, C>
where
    R: RequestRepository,
    C: Clock + Send + Sync,
{
    /// Creates a view service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: Arc<DeskConfig>) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Returns the current calendar day in the configured offset.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock
            .utc()
            .with_timezone(&self.config.utc_offset)
            .date_naive()
    }

    /// Builds the calendar overview for `day`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be read.
    pub async fn day_overview(&self, day: NaiveDate) -> RequestRepositoryResult<DayOverview> {
        let requests = self.repository.snapshot().await?;
        let overview = day_overview(&requests, day, self.config.utc_offset);
        if !overview.conflicts.is_empty() {
            tracing::debug!(%day, conflicts = overview.conflicts.len(), "booking conflicts found");
        }
        Ok(overview)
    }

    /// Returns every request group that passes `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be read.
    pub async fn groups(&self, filter: &GroupFilter) -> RequestRepositoryResult<Vec<RequestGroup>> {
        let requests = self.repository.snapshot().await?;
        Ok(filter.apply(group_requests(&requests)))
    }

    /// Splits the request groups into technician queues.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be read.
    pub async fn technician_queues(&self) -> RequestRepositoryResult<TechnicianQueues> {
        let requests = self.repository.snapshot().await?;
        Ok(technician_queues(&group_requests(&requests)))
    }

    /// Computes the dashboard counters and charts as of today.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be read.
    pub async fn dashboard(&self) -> RequestRepositoryResult<Dashboard> {
        let requests = self.repository.snapshot().await?;
        let today = self.today();
        let offset = self.config.utc_offset;
        Ok(Dashboard {
            stats: RequestStats::compute(&requests, today, offset),
            by_type: count_by_type(&requests),
            trend: daily_trend(&requests, today, TREND_DAYS, offset),
        })
    }
}
