//! Port contracts for request lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by request services.

pub mod repository;

pub use repository::{ListQuery, RequestRepository, RequestRepositoryError, RequestRepositoryResult};
