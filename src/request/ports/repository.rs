//! Repository port for request persistence and lookup.

use crate::request::domain::{Request, RequestId, RequestStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for request repository operations.
pub type RequestRepositoryResult<T> = Result<T, RequestRepositoryError>;

/// Paging and filtering options for [`RequestRepository::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Number of matching requests to skip.
    pub offset: usize,
    /// Maximum number of requests to return.
    pub limit: usize,
    /// Only return requests in this status.
    pub status: Option<RequestStatus>,
}

impl ListQuery {
    /// Creates a query for the first `limit` requests in any status.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            offset: 0,
            limit,
            status: None,
        }
    }

    /// Skips the first `offset` matching requests.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Restricts the query to one status.
    #[must_use]
    pub const fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request persistence contract.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Reserves a fresh request identifier.
    ///
    /// Identifiers are never reused.
    async fn next_id(&self) -> RequestRepositoryResult<RequestId>;

    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestRepositoryError::DuplicateRequest`] when the request
    /// ID already exists.
    async fn store(&self, request: &Request) -> RequestRepositoryResult<()>;

    /// Persists changes to an existing request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestRepositoryError::NotFound`] when the request does not
    /// exist.
    async fn update(&self, request: &Request) -> RequestRepositoryResult<()>;

    /// Finds a request by identifier.
    ///
    /// Returns `None` when the request does not exist.
    async fn find_by_id(&self, id: RequestId) -> RequestRepositoryResult<Option<Request>>;

    /// Returns the direct sub-requests of `parent_id` in ascending ID order.
    async fn find_children(&self, parent_id: RequestId) -> RequestRepositoryResult<Vec<Request>>;

    /// Returns one page of requests in ascending ID order.
    async fn list(&self, query: ListQuery) -> RequestRepositoryResult<Vec<Request>>;

    /// Returns every request in ascending ID order.
    ///
    /// Views recompute from this full snapshot on every call.
    async fn snapshot(&self) -> RequestRepositoryResult<Vec<Request>>;
}

/// Errors returned by request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RequestRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate request identifier: {0}")]
    DuplicateRequest(RequestId),

    /// The request was not found.
    #[error("request not found: {0}")]
    NotFound(RequestId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RequestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
