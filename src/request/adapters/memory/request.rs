//! In-memory repository for request lifecycle tests and embedded use.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::request::{
    domain::{Request, RequestId},
    ports::{ListQuery, RequestRepository, RequestRepositoryError, RequestRepositoryResult},
};

/// Thread-safe in-memory request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestRepository {
    state: Arc<RwLock<InMemoryRequestState>>,
}

#[derive(Debug, Default)]
struct InMemoryRequestState {
    last_id: i64,
    requests: BTreeMap<RequestId, Request>,
    children_index: HashMap<RequestId, Vec<RequestId>>,
}

impl InMemoryRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `requests`.
    ///
    /// Later identifiers continue after the largest seeded one.
    ///
    /// # Errors
    ///
    /// Returns [`RequestRepositoryError::DuplicateRequest`] when two seeded
    /// requests share an identifier.
    pub fn with_requests(
        requests: impl IntoIterator<Item = Request>,
    ) -> RequestRepositoryResult<Self> {
        let repository = Self::new();
        {
            let mut state = repository.write()?;
            for request in requests {
                insert_new(&mut state, request)?;
            }
        }
        Ok(repository)
    }

    fn read(&self) -> RequestRepositoryResult<RwLockReadGuard<'_, InMemoryRequestState>> {
        self.state.read().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RequestRepositoryResult<RwLockWriteGuard<'_, InMemoryRequestState>> {
        self.state.write().map_err(|err| {
            RequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn insert_new(state: &mut InMemoryRequestState, request: Request) -> RequestRepositoryResult<()> {
    let id = request.id();
    if state.requests.contains_key(&id) {
        return Err(RequestRepositoryError::DuplicateRequest(id));
    }
    if let Some(parent_id) = request.parent_id() {
        state.children_index.entry(parent_id).or_default().push(id);
    }
    state.last_id = state.last_id.max(id.value());
    state.requests.insert(id, request);
    Ok(())
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn next_id(&self) -> RequestRepositoryResult<RequestId> {
        let mut state = self.write()?;
        state.last_id = state.last_id.checked_add(1).ok_or_else(|| {
            RequestRepositoryError::persistence(std::io::Error::other(
                "request identifier space exhausted",
            ))
        })?;
        Ok(RequestId::new(state.last_id))
    }

    async fn store(&self, request: &Request) -> RequestRepositoryResult<()> {
        let mut state = self.write()?;
        insert_new(&mut state, request.clone())
    }

    async fn update(&self, request: &Request) -> RequestRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .requests
            .get_mut(&request.id())
            .ok_or(RequestRepositoryError::NotFound(request.id()))?;
        // Parent links are fixed at submission, so the children index stays valid.
        *slot = request.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: RequestId) -> RequestRepositoryResult<Option<Request>> {
        let state = self.read()?;
        Ok(state.requests.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: RequestId) -> RequestRepositoryResult<Vec<Request>> {
        let state = self.read()?;
        let mut children: Vec<Request> = state
            .children_index
            .get(&parent_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.requests.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        children.sort_by_key(Request::id);
        Ok(children)
    }

    async fn list(&self, query: ListQuery) -> RequestRepositoryResult<Vec<Request>> {
        let state = self.read()?;
        Ok(state
            .requests
            .values()
            .filter(|request| query.status.is_none_or(|status| request.status() == status))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn snapshot(&self) -> RequestRepositoryResult<Vec<Request>> {
        let state = self.read()?;
        Ok(state.requests.values().cloned().collect())
    }
}
