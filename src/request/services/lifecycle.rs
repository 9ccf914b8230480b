//! Service layer for request submission, triage and cancellation.

use crate::config::DeskConfig;
use crate::request::{
    domain::{
        Actor, Request, RequestDomainError, RequestDraft, RequestId, RequestStatus, UserId,
    },
    ports::{ListQuery, RequestRepository, RequestRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Note recorded on a request its submitter cancelled.
const CANCELLED_BY_USER: &str = "Cancelled by user";

/// Note recorded on sub-requests cancelled along with their parent.
const CANCELLED_WITH_PARENT: &str = "Cancelled because parent request was cancelled";

/// Paging and filtering options for listing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListRequestsRequest {
    offset: usize,
    limit: Option<usize>,
    status: Option<RequestStatus>,
}

impl ListRequestsRequest {
    /// Lists the first page of requests in any status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            limit: None,
            status: None,
        }
    }

    /// Skips the first `offset` matching requests.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Overrides the configured page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restricts the listing to one status.
    #[must_use]
    pub const fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for changing a request's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    request_id: RequestId,
    status: RequestStatus,
    note: Option<String>,
}

impl UpdateStatusRequest {
    /// Creates a status change without a note.
    #[must_use]
    pub const fn new(request_id: RequestId, status: RequestStatus) -> Self {
        Self {
            request_id,
            status,
            note: None,
        }
    }

    /// Attaches a note; for rejections it becomes the rejection reason.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Service-level errors for request lifecycle operations.
#[derive(Debug, Error)]
pub enum RequestLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RequestDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RequestRepositoryError),
    /// The request does not exist.
    #[error("request not found: {0}")]
    NotFound(RequestId),
    /// The parent named for a sub-request does not exist.
    #[error("parent request not found: {0}")]
    ParentNotFound(RequestId),
    /// The parent named for a sub-request is itself a sub-request.
    #[error("request {0} is a sub-request and cannot have sub-requests")]
    NestedSubRequest(RequestId),
    /// Only the submitter may cancel a request.
    #[error("user {user} is not the submitter of request {request}")]
    NotOwner {
        /// Request the user tried to cancel.
        request: RequestId,
        /// User who tried to cancel it.
        user: UserId,
    },
}

/// Result type for request lifecycle service operations.
pub type RequestLifecycleResult<T> = Result<T, RequestLifecycleError>;

/// Request lifecycle orchestration service.
#[derive(Clone)]
pub struct RequestLifecycleService<R, C>
where
    R: RequestRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: Arc<DeskConfig>,
}

impl<R, C> RequestLifecycleService<R, C>
where
    R: RequestRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, Arc::new(DeskConfig::default()))
    }

    /// Creates a service with an explicit configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<R>, clock: Arc<C>, config: Arc<DeskConfig>) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Submits a new root request on behalf of `actor`.
    ///
    /// Request types configured for auto-forwarding go straight to
    /// technicians; everything else waits for triage.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the store rejects
    /// the request.
    pub async fn submit(&self, actor: &Actor, draft: RequestDraft) -> RequestLifecycleResult<Request> {
        self.create(None, actor, draft).await
    }

    /// Submits a sub-request under `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::ParentNotFound`] when the parent does
    /// not exist, [`RequestLifecycleError::NestedSubRequest`] when the parent
    /// is itself a sub-request, or [`RequestLifecycleError::Repository`] when
    /// the store fails.
    pub async fn submit_sub_request(
        &self,
        parent_id: RequestId,
        actor: &Actor,
        draft: RequestDraft,
    ) -> RequestLifecycleResult<Request> {
        let parent = self
            .repository
            .find_by_id(parent_id)
            .await?
            .ok_or(RequestLifecycleError::ParentNotFound(parent_id))?;
        if !parent.is_root() {
            tracing::warn!(%parent_id, "refusing to nest a sub-request under a sub-request");
            return Err(RequestLifecycleError::NestedSubRequest(parent_id));
        }
        self.create(Some(parent_id), actor, draft).await
    }

    /// Retrieves a request by identifier.
    ///
    /// Returns `Ok(None)` when the request does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: RequestId) -> RequestLifecycleResult<Option<Request>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists one page of requests in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, request: ListRequestsRequest) -> RequestLifecycleResult<Vec<Request>> {
        let mut query =
            ListQuery::new(request.limit.unwrap_or(self.config.list_limit)).with_offset(request.offset);
        if let Some(status) = request.status {
            query = query.with_status(status);
        }
        Ok(self.repository.list(query).await?)
    }

    /// Changes a request's status.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::NotFound`] when the request does not
    /// exist, [`RequestLifecycleError::Domain`] when the transition is not
    /// permitted, or [`RequestLifecycleError::Repository`] when the store
    /// fails.
    pub async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> RequestLifecycleResult<Request> {
        let UpdateStatusRequest {
            request_id,
            status,
            note,
        } = request;
        let mut stored = self.load(request_id).await?;
        stored
            .transition_to(status, note.as_deref(), &*self.clock)
            .inspect_err(|err| tracing::warn!(error = %err, "status change refused"))?;
        self.repository.update(&stored).await?;
        tracing::info!(
            request_id = %stored.id(),
            status = %stored.status(),
            "request status changed"
        );
        Ok(stored)
    }

    /// Cancels a request and every open sub-request beneath it.
    ///
    /// Sub-requests that already reached a terminal status keep it. Every
    /// transition is applied in memory before anything is written, so a
    /// refused transition leaves the store untouched. The writes themselves
    /// are not transactional: a store failure part-way through leaves the
    /// root cancelled with some sub-requests still open.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLifecycleError::NotFound`] when the request does not
    /// exist, [`RequestLifecycleError::NotOwner`] when `actor` did not submit
    /// it, [`RequestLifecycleError::Domain`] when it is already terminal, or
    /// [`RequestLifecycleError::Repository`] when the store fails.
    pub async fn cancel(&self, request_id: RequestId, actor: &Actor) -> RequestLifecycleResult<Request> {
        let mut stored = self.load(request_id).await?;
        if stored.created_by_id() != Some(actor.id()) {
            tracing::warn!(%request_id, user = %actor.id(), "cancellation by non-submitter refused");
            return Err(RequestLifecycleError::NotOwner {
                request: request_id,
                user: actor.id(),
            });
        }

        stored.cancel(CANCELLED_BY_USER, &*self.clock)?;
        let mut cascade = Vec::new();
        for mut child in self.repository.find_children(request_id).await? {
            if child.status().is_terminal() {
                continue;
            }
            child.cancel(CANCELLED_WITH_PARENT, &*self.clock)?;
            cascade.push(child);
        }

        self.repository.update(&stored).await?;
        for child in &cascade {
            self.repository.update(child).await?;
        }

        tracing::info!(%request_id, cascaded = cascade.len(), "request cancelled");
        Ok(stored)
    }

    async fn create(
        &self,
        parent_id: Option<RequestId>,
        actor: &Actor,
        draft: RequestDraft,
    ) -> RequestLifecycleResult<Request> {
        let auto_forward = self.config.auto_forwards(draft.request_type());
        let id = self.repository.next_id().await?;
        let mut request = Request::submit(id, parent_id, draft, actor, &*self.clock);
        if auto_forward {
            request.auto_forward(&*self.clock)?;
        }
        self.repository.store(&request).await?;
        tracing::info!(
            request_id = %id,
            parent_id = ?parent_id.map(RequestId::value),
            status = %request.status(),
            "request submitted"
        );
        Ok(request)
    }

    async fn load(&self, id: RequestId) -> RequestLifecycleResult<Request> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RequestLifecycleError::NotFound(id))
    }
}
