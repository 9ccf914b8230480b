//! Request lifecycle management for Campusdesk.
//!
//! Students submit requests, optionally attaching sub-requests one level
//! below a root request. Intermediaries forward or reject them, technicians
//! complete them, and submitters may cancel their own requests, which
//! cascades to every open sub-request. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
