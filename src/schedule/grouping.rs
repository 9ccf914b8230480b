//! Parent/child grouping of requests.

use crate::request::domain::{Request, RequestId};
use serde::Serialize;
use std::collections::HashMap;

/// A root request together with its sub-requests.
///
/// Serializes as the root's own fields plus a `children` array, so consumers
/// see every root attribute unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestGroup {
    #[serde(flatten)]
    root: Request,
    children: Vec<Request>,
}

impl RequestGroup {
    /// Returns the root request.
    #[must_use]
    pub const fn root(&self) -> &Request {
        &self.root
    }

    /// Returns the sub-requests, newest first.
    #[must_use]
    pub fn children(&self) -> &[Request] {
        &self.children
    }

    /// Iterates over the root followed by its children.
    pub fn members(&self) -> impl Iterator<Item = &Request> {
        std::iter::once(&self.root).chain(self.children.iter())
    }

    /// Splits the group into its root and children.
    #[must_use]
    pub fn into_parts(self) -> (Request, Vec<Request>) {
        (self.root, self.children)
    }
}

/// Groups a flat snapshot into root requests with their sub-requests.
///
/// Children are attached to the root whose ID matches their `parent_id`;
/// children whose parent is not among the roots are dropped. Groups and the
/// children inside each group are ordered by `created_at`, newest first, with
/// undated requests last. Equal timestamps keep their input order.
#[must_use]
pub fn group_requests(requests: &[Request]) -> Vec<RequestGroup> {
    let mut children_by_parent: HashMap<RequestId, Vec<Request>> = HashMap::new();
    for child in requests {
        if let Some(parent_id) = child.parent_id() {
            children_by_parent
                .entry(parent_id)
                .or_default()
                .push(child.clone());
        }
    }
    for children in children_by_parent.values_mut() {
        sort_newest_first(children);
    }

    let mut groups: Vec<RequestGroup> = requests
        .iter()
        .filter(|request| request.is_root())
        .map(|root| RequestGroup {
            root: root.clone(),
            children: children_by_parent
                .get(&root.id())
                .cloned()
                .unwrap_or_default(),
        })
        .collect();
    groups.sort_by(|left, right| right.root.created_at().cmp(&left.root.created_at()));

    tracing::debug!(
        requests = requests.len(),
        groups = groups.len(),
        "grouped request snapshot"
    );
    groups
}

/// Stable descending sort; `None` compares below every timestamp.
fn sort_newest_first(requests: &mut [Request]) {
    requests.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
}
