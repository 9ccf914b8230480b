//! Derived views over request snapshots.
//!
//! Everything here is a pure function of the snapshot it is given: no I/O,
//! no clock reads, no state kept between calls. Callers refetch the snapshot
//! and recompute whenever the store changes.
//!
//! - [`grouping`]: one-level parent/child groups ordered newest first
//! - [`conflict`]: same-day, same-location booking collisions
//! - [`calendar`]: day bucketing and the calendar day overview
//! - [`filter`]: dashboard search and technician work queues
//! - [`stats`]: dashboard counters and trends

pub mod calendar;
pub mod conflict;
pub mod filter;
pub mod grouping;
pub mod stats;

pub use calendar::{DayOverview, day_overview, facility_requests, requests_on_day};
pub use conflict::{Conflict, ConflictKind, are_related, detect_conflicts, normalize_location};
pub use filter::{GroupFilter, TechnicianQueues, technician_queues};
pub use grouping::{RequestGroup, group_requests};
pub use stats::{DailyCount, RequestStats, TypeCount, count_by_type, daily_trend};

#[cfg(test)]
mod tests;
