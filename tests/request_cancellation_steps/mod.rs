//! Step definitions for request cancellation scenarios.

pub mod then;
pub mod world;
