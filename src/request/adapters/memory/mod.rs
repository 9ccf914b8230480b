//! In-memory adapters.

mod request;

pub use request::InMemoryRequestRepository;
