//! Domain model for facility requests.
//!
//! Request records are owned by the request store. The domain validates new
//! submissions, enforces status transitions and keeps an append-only history
//! of every lifecycle change.

mod actor;
mod error;
mod history;
mod ids;
mod kind;
mod lenient;
mod request;
mod status;
pub(crate) mod timestamp;

pub use actor::Actor;
pub use error::{ParseRequestStatusError, RequestDomainError};
pub use history::HistoryEntry;
pub use ids::{RequestId, UserId};
pub use kind::RequestType;
pub use request::{PersistedRequestData, Request, RequestDraft};
pub use status::RequestStatus;
