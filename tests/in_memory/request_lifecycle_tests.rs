//! In-memory integration tests for request lifecycle operations.

use super::helpers::{Desk, desk, draft, rival, student};
use campusdesk::request::{
    domain::{Actor, RequestStatus, RequestType},
    services::{ListRequestsRequest, RequestLifecycleError, UpdateStatusRequest},
};
use campusdesk::schedule::{ConflictKind, GroupFilter};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repair_request_moves_through_triage(desk: Desk, student: Actor) -> eyre::Result<()> {
    let created = desk
        .service
        .submit(
            &student,
            draft(RequestType::EquipmentRepair, "Lab 4", "Oscilloscope dead")?,
        )
        .await?;
    eyre::ensure!(created.status() == RequestStatus::Pending);

    desk.service
        .update_status(UpdateStatusRequest::new(created.id(), RequestStatus::Assigned))
        .await?;
    let completed = desk
        .service
        .update_status(
            UpdateStatusRequest::new(created.id(), RequestStatus::Completed)
                .with_note("Replaced fuse"),
        )
        .await?;

    let actions: Vec<&str> = completed
        .history()
        .iter()
        .map(|entry| entry.action.as_str())
        .collect();
    eyre::ensure!(
        actions
            == [
                "Created",
                "Status changed to assigned",
                "Status changed to completed",
            ],
        "unexpected history {actions:?}"
    );
    let timestamps: Vec<_> = completed
        .history()
        .iter()
        .map(|entry| entry.timestamp)
        .collect();
    eyre::ensure!(timestamps.windows(2).all(|pair| match pair {
        [earlier, later] => earlier <= later,
        _ => true,
    }));

    let queues = desk.views.technician_queues().await?;
    eyre::ensure!(queues.active.is_empty());
    eyre::ensure!(queues.history.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn double_booking_shows_in_today_overview(
    desk: Desk,
    student: Actor,
    rival: Actor,
) -> eyre::Result<()> {
    let first = desk
        .service
        .submit(&student, draft(RequestType::FacilityUsage, "Main Hall", "Debate")?)
        .await?;
    let second = desk
        .service
        .submit(&rival, draft(RequestType::FacilityUsage, " main hall", "Choir")?)
        .await?;
    eyre::ensure!(first.status() == RequestStatus::Assigned);

    let overview = desk.views.day_overview(desk.views.today()).await?;

    eyre::ensure!(overview.total == 2);
    let conflict = overview
        .conflicts
        .first()
        .ok_or_else(|| eyre::eyre!("expected a conflict"))?;
    eyre::ensure!(conflict.kind == ConflictKind::Critical);
    eyre::ensure!(conflict.items[0].id() == first.id());
    eyre::ensure!(conflict.items[1].id() == second.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelling_a_booking_clears_its_conflicts(
    desk: Desk,
    student: Actor,
    rival: Actor,
) -> eyre::Result<()> {
    let root = desk
        .service
        .submit(&student, draft(RequestType::FacilityUsage, "Room 12", "Club night")?)
        .await?;
    desk.service
        .submit_sub_request(
            root.id(),
            &student,
            draft(RequestType::FacilityUsage, "Room 12", "Setup slot")?,
        )
        .await?;
    desk.service
        .submit(&rival, draft(RequestType::FacilityUsage, "Room 12", "Rehearsal")?)
        .await?;

    let before = desk.views.day_overview(desk.views.today()).await?;
    eyre::ensure!(before.conflicts.len() == 2, "got {:?}", before.conflicts);

    desk.service.cancel(root.id(), &student).await?;

    let after = desk.views.day_overview(desk.views.today()).await?;
    eyre::ensure!(after.total == 1);
    eyre::ensure!(after.conflicts.is_empty());

    let cancelled = desk
        .service
        .list(ListRequestsRequest::new().with_status(RequestStatus::Cancelled))
        .await?;
    eyre::ensure!(cancelled.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rival_cannot_cancel_foreign_request(
    desk: Desk,
    student: Actor,
    rival: Actor,
) -> eyre::Result<()> {
    let root = desk
        .service
        .submit(&student, draft(RequestType::Cleaning, "Cafeteria", "Spill")?)
        .await?;

    let result = desk.service.cancel(root.id(), &rival).await;

    eyre::ensure!(matches!(result, Err(RequestLifecycleError::NotOwner { .. })));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_finds_group_through_sub_request(desk: Desk, student: Actor) -> eyre::Result<()> {
    let root = desk
        .service
        .submit(&student, draft(RequestType::RoomAccess, "Studio", "Evening access")?)
        .await?;
    desk.service
        .submit_sub_request(
            root.id(),
            &student,
            draft(RequestType::EquipmentRepair, "Studio", "Tripod clamp")?,
        )
        .await?;
    desk.service
        .submit(&student, draft(RequestType::Cleaning, "Foyer", "Mud")?)
        .await?;

    let groups = desk.views.groups(&GroupFilter::new().with_search("tripod")).await?;

    eyre::ensure!(groups.len() == 1);
    let group = groups.first().ok_or_else(|| eyre::eyre!("missing group"))?;
    eyre::ensure!(group.root().id() == root.id());
    eyre::ensure!(group.children().len() == 1);
    Ok(())
}
