//! Campusdesk: facility-request tracking for campus operations.
//!
//! Students submit requests (facility usage, repairs, cleaning and so on), an
//! intermediary triages and forwards them, and a technician resolves them.
//! This crate provides the request lifecycle together with the derived views
//! used by dashboards and the calendar.
//!
//! # Architecture
//!
//! Campusdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store,
//!   JSON snapshots)
//!
//! # Modules
//!
//! - [`request`]: Request records, lifecycle and the request store port
//! - [`schedule`]: Grouping, conflict detection and calendar views
//! - [`config`]: Deployment configuration

pub mod config;
pub mod request;
pub mod schedule;
