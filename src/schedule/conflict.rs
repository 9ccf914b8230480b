//! Same-day booking conflict detection.
//!
//! Two active facility bookings collide when their normalized locations
//! match. Whether their reserved time windows overlap is not considered: a
//! location booked twice on the same day is flagged either way.

use crate::request::domain::Request;
use serde::Serialize;
use std::fmt;

/// Severity of a booking collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Two different users booked the same location.
    Critical,
    /// One user booked the same location under unrelated request chains.
    Warning,
}

impl ConflictKind {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of colliding bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// Severity of the collision.
    pub kind: ConflictKind,
    /// Human-readable explanation naming the location or the user.
    pub message: String,
    /// The colliding requests, in input order.
    pub items: [Request; 2],
}

/// Trims and lowercases a location for comparison.
#[must_use]
pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Returns `true` when one request is the other's parent or both share a
/// parent.
#[must_use]
pub fn are_related(first: &Request, second: &Request) -> bool {
    let first_parent = first.parent_id();
    let second_parent = second.parent_id();

    first_parent == Some(second.id())
        || second_parent == Some(first.id())
        || first_parent.is_some() && first_parent == second_parent
}

/// Finds colliding bookings among one day's requests.
///
/// Only facility-usage requests that are neither rejected nor cancelled take
/// part. Every unordered pair is examined once, in input order, and each
/// collision yields its own entry: three users booking one room produce three
/// critical conflicts.
#[must_use]
pub fn detect_conflicts(day_requests: &[Request]) -> Vec<Conflict> {
    let bookings: Vec<(&Request, String)> = day_requests
        .iter()
        .filter(|request| request.is_active_booking())
        .map(|request| (request, normalize_location(request.location())))
        .collect();

    let mut conflicts = Vec::new();
    for (position, (first, first_location)) in bookings.iter().enumerate() {
        for (second, second_location) in bookings.iter().skip(position + 1) {
            if first_location.is_empty() || first_location != second_location {
                continue;
            }
            if let Some(conflict) = classify(first, second) {
                conflicts.push(conflict);
            }
        }
    }

    tracing::debug!(
        bookings = bookings.len(),
        conflicts = conflicts.len(),
        "checked day for booking conflicts"
    );
    conflicts
}

/// Classifies two bookings already known to share a location.
fn classify(first: &Request, second: &Request) -> Option<Conflict> {
    match (first.created_by_id(), second.created_by_id()) {
        (Some(first_owner), Some(second_owner)) if first_owner != second_owner => Some(Conflict {
            kind: ConflictKind::Critical,
            message: format!(
                "Critical conflict: {} was booked by two different users at the same time.",
                first.location().trim()
            ),
            items: [first.clone(), second.clone()],
        }),
        (first_owner, second_owner) => {
            if are_related(first, second) {
                return None;
            }
            let owner = first_owner
                .or(second_owner)
                .map_or_else(|| "unknown".to_owned(), |id| id.to_string());
            Some(Conflict {
                kind: ConflictKind::Warning,
                message: format!(
                    "Warning: user #{owner} booked the same location for two unrelated request groups."
                ),
                items: [first.clone(), second.clone()],
            })
        }
    }
}
