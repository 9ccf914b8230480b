//! Adapter implementations for the request ports.
//!
//! - [`memory`]: lock-protected in-memory request store
//! - [`snapshot`]: decoding of JSON snapshots served by the request API

pub mod memory;
pub mod snapshot;
