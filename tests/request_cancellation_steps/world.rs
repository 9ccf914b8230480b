//! Shared world state for request cancellation BDD scenarios.

use std::sync::Arc;

use campusdesk::request::{
    adapters::memory::InMemoryRequestRepository,
    domain::{Actor, Request},
    services::{RequestLifecycleError, RequestLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestRequestService = RequestLifecycleService<InMemoryRequestRepository, DefaultClock>;

/// Scenario world for request cancellation behaviour tests.
pub struct CancellationWorld {
    pub service: TestRequestService,
    pub student: Option<Actor>,
    pub request: Option<Request>,
    pub sub_requests: Vec<Request>,
    pub last_cancel_result: Option<Result<Request, RequestLifecycleError>>,
}

impl CancellationWorld {
    /// Creates a world with an empty request store.
    #[must_use]
    pub fn new() -> Self {
        let service = RequestLifecycleService::new(
            Arc::new(InMemoryRequestRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            student: None,
            request: None,
            sub_requests: Vec::new(),
            last_cancel_result: None,
        }
    }

    /// Returns the scenario's student.
    ///
    /// # Errors
    ///
    /// Returns an error when no student has been introduced yet.
    pub fn student(&self) -> Result<&Actor, eyre::Report> {
        self.student
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing student in scenario world"))
    }

    /// Returns the scenario's root request.
    ///
    /// # Errors
    ///
    /// Returns an error when no request has been submitted yet.
    pub fn request(&self) -> Result<&Request, eyre::Report> {
        self.request
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing submitted request in scenario world"))
    }
}

impl Default for CancellationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CancellationWorld {
    CancellationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
