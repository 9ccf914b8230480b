//! Then steps for request cancellation BDD scenarios.

use super::world::{CancellationWorld, run_async};
use campusdesk::request::{
    domain::{RequestDomainError, RequestStatus},
    services::RequestLifecycleError,
};
use rstest_bdd_macros::then;

fn expected_status(status: &str) -> Result<RequestStatus, eyre::Report> {
    RequestStatus::try_from(status).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then(r#"the request status is "{status}""#)]
fn request_status_is(world: &CancellationWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let request_id = world.request()?.id();
    let stored = run_async(world.service.find_by_id(request_id))?
        .ok_or_else(|| eyre::eyre!("request {request_id} disappeared"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"every sub-request status is "{status}""#)]
fn every_sub_request_status_is(
    world: &CancellationWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    eyre::ensure!(!world.sub_requests.is_empty(), "scenario has no sub-requests");

    for sub_request in &world.sub_requests {
        let stored = run_async(world.service.find_by_id(sub_request.id()))?
            .ok_or_else(|| eyre::eyre!("sub-request {} disappeared", sub_request.id()))?;
        if stored.status() != expected {
            return Err(eyre::eyre!(
                "expected sub-request {} to be {expected}, found {}",
                stored.id(),
                stored.status()
            ));
        }
    }
    Ok(())
}

#[then("the cancellation is refused because the user is not the submitter")]
fn refused_not_owner(world: &CancellationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_cancel_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing cancellation result"))?;

    if !matches!(result, Err(RequestLifecycleError::NotOwner { .. })) {
        return Err(eyre::eyre!("expected NotOwner error, got {result:?}"));
    }
    Ok(())
}

#[then("the cancellation is refused as an invalid status transition")]
fn refused_invalid_transition(world: &CancellationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_cancel_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing cancellation result"))?;

    if !matches!(
        result,
        Err(RequestLifecycleError::Domain(
            RequestDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }
    Ok(())
}
