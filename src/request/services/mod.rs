//! Application services for request lifecycle orchestration.

mod lifecycle;
mod views;

pub use lifecycle::{
    ListRequestsRequest, RequestLifecycleError, RequestLifecycleResult, RequestLifecycleService,
    UpdateStatusRequest,
};
pub use views::{Dashboard, RequestViewService, TREND_DAYS};
