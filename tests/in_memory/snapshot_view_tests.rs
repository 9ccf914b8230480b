//! Views computed over snapshots decoded from the request API.

use std::sync::Arc;

use campusdesk::config::DeskConfig;
use campusdesk::request::{
    adapters::{memory::InMemoryRequestRepository, snapshot::parse_snapshot_str},
    domain::RequestId,
    services::RequestViewService,
};
use campusdesk::schedule::{ConflictKind, RequestGroup, detect_conflicts, group_requests};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

const SNAPSHOT: &str = r#"[
    {"id": 1, "parent_id": null, "type": "Facility Usage", "status": "pending",
     "location": "A", "created_at": "2024-01-02T10:00:00Z", "created_by_id": 5},
    {"id": "2", "parent_id": "1", "type": "Facility Usage", "status": "assigned",
     "location": "a ", "created_at": "2024-01-03T10:00:00Z", "created_by_id": 5},
    {"id": 3, "parent_id": "", "type": "Cleaning", "status": "pending",
     "location": "B", "created_at": "2024-01-01T10:00:00"},
    {"id": 4, "type": "Facility Usage", "status": "pending",
     "location": "A", "created_at": "2024-01-02T15:00:00Z", "created_by_id": 5},
    {"id": 5, "parent_id": 77, "type": "Facility Usage", "location": "A",
     "created_at": "2024-01-02T16:00:00Z", "created_by_id": 6},
    {"location": "no id here"},
    "garbage"
]"#;

fn roots(groups: &[RequestGroup]) -> Vec<i64> {
    groups
        .iter()
        .map(|group| group.root().id().value())
        .collect()
}

#[rstest]
fn malformed_records_are_skipped() {
    let requests = parse_snapshot_str(SNAPSHOT);
    let ids: Vec<i64> = requests.iter().map(|request| request.id().value()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[rstest]
#[case("{}")]
#[case("null")]
#[case("not json")]
fn unusable_payloads_are_empty(#[case] raw: &str) {
    assert!(parse_snapshot_str(raw).is_empty());
}

#[rstest]
fn decoded_snapshot_groups_newest_first() {
    let groups = group_requests(&parse_snapshot_str(SNAPSHOT));

    assert_eq!(roots(&groups), vec![4, 1, 3]);
    let children: Vec<i64> = groups
        .iter()
        .flat_map(|group| group.children().iter().map(|child| child.id().value()))
        .collect();
    assert_eq!(children, vec![2]);
}

#[rstest]
fn same_owner_unrelated_booking_warns() {
    let requests = parse_snapshot_str(SNAPSHOT);
    let without_child: Vec<_> = requests
        .into_iter()
        .filter(|request| request.id() != RequestId::new(2))
        .collect();

    let conflicts = detect_conflicts(&without_child);
    let kinds: Vec<ConflictKind> = conflicts.iter().map(|conflict| conflict.kind).collect();

    assert_eq!(
        kinds,
        vec![
            ConflictKind::Warning,
            ConflictKind::Critical,
            ConflictKind::Critical,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_service_reads_seeded_snapshot() -> eyre::Result<()> {
    let repository = InMemoryRequestRepository::with_requests(parse_snapshot_str(SNAPSHOT))?;
    let views = RequestViewService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
        Arc::new(DeskConfig::default()),
    );
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or_else(|| eyre::eyre!("bad date"))?;

    let overview = views.day_overview(day).await?;

    eyre::ensure!(overview.total == 3);
    eyre::ensure!(roots(&overview.groups) == vec![4, 1]);
    eyre::ensure!(overview.conflicts.len() == 3);
    Ok(())
}
