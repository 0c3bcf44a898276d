//! Integration tests for the issue repository: timeline persistence,
//! resolution stamping, and the escalation write.

mod common;

use sqlx::PgPool;

use common::{seed_employee, seed_event};
use fieldops_core::issue::{
    creation_entry, escalation_action, status_change_action, TimelineEntry, STATUS_IN_PROGRESS,
    STATUS_OPEN, STATUS_RESOLVED,
};
use fieldops_db::models::issue::{CreateIssue, IssueQuery};
use fieldops_db::repositories::IssueRepo;

async fn seed_issue(pool: &PgPool, escalated_to: Option<i64>) -> fieldops_db::models::issue::Issue {
    let raiser = seed_employee(pool, "raiser").await;
    let event = seed_event(pool, "Village Fair", raiser.id).await;
    let dto = CreateIssue {
        event_id: event.id,
        raised_by: raiser.id,
        issue_type: "EQUIPMENT".to_string(),
        description: "Projector not working".to_string(),
        escalated_to,
    };
    let timeline = vec![creation_entry(raiser.id, chrono::Utc::now())];
    IssueRepo::create(pool, &dto, timeline).await.unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_starts_open_with_seeded_timeline(pool: PgPool) {
    let issue = seed_issue(&pool, None).await;

    assert_eq!(issue.status, STATUS_OPEN);
    assert_eq!(issue.timeline.0.len(), 1);
    assert_eq!(issue.timeline.0[0].action, "Issue Created");
    assert_eq!(issue.timeline.0[0].performed_by, issue.raised_by);
    assert!(issue.resolved_by.is_none());
    assert!(issue.resolved_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_status_appends_and_stamps_resolution(pool: PgPool) {
    let issue = seed_issue(&pool, None).await;
    let resolver = seed_employee(&pool, "resolver").await;
    let now = chrono::Utc::now();

    let mut timeline = issue.timeline.0.clone();
    timeline.push(TimelineEntry::new(
        status_change_action(STATUS_RESOLVED, Some("replaced projector")),
        resolver.id,
        now,
    ));

    let updated = IssueRepo::update_status(
        &pool,
        issue.id,
        STATUS_RESOLVED,
        timeline,
        Some(resolver.id),
        Some(now),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, STATUS_RESOLVED);
    assert_eq!(updated.timeline.0.len(), 2);
    assert_eq!(
        updated.timeline.0[1].action,
        "Status changed to RESOLVED: replaced projector"
    );
    // The seed entry is untouched.
    assert_eq!(updated.timeline.0[0].action, "Issue Created");
    assert_eq!(updated.resolved_by, Some(resolver.id));
    assert!(updated.resolved_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_status_on_missing_issue_returns_none(pool: PgPool) {
    let result = IssueRepo::update_status(&pool, 9999, STATUS_IN_PROGRESS, Vec::new(), None, None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn escalate_forces_in_progress_even_from_resolved(pool: PgPool) {
    let issue = seed_issue(&pool, None).await;
    let resolver = seed_employee(&pool, "resolver").await;
    let escalatee = seed_employee(&pool, "escalatee").await;
    let now = chrono::Utc::now();

    // Resolve first.
    let mut timeline = issue.timeline.0.clone();
    timeline.push(TimelineEntry::new(
        status_change_action(STATUS_RESOLVED, None),
        resolver.id,
        now,
    ));
    IssueRepo::update_status(&pool, issue.id, STATUS_RESOLVED, timeline.clone(), Some(resolver.id), Some(now))
        .await
        .unwrap();

    // Escalation reopens it as IN_PROGRESS regardless.
    timeline.push(TimelineEntry::new(
        escalation_action(escalatee.id),
        resolver.id,
        chrono::Utc::now(),
    ));
    let escalated = IssueRepo::escalate(&pool, issue.id, escalatee.id, timeline)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(escalated.status, STATUS_IN_PROGRESS);
    assert_eq!(escalated.escalated_to, Some(escalatee.id));
    assert_eq!(escalated.timeline.0.len(), 3);
    assert_eq!(
        escalated.timeline.0[2].action,
        format!("Escalated to {}", escalatee.id)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn open_count_and_filters(pool: PgPool) {
    let issue = seed_issue(&pool, None).await;
    assert_eq!(IssueRepo::count_open(&pool).await.unwrap(), 1);

    let by_event = IssueRepo::list(
        &pool,
        &IssueQuery {
            event_id: Some(issue.event_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_event.len(), 1);

    let by_status = IssueRepo::list(
        &pool,
        &IssueQuery {
            status: Some(STATUS_RESOLVED.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(by_status.is_empty());

    let by_raiser = IssueRepo::list(
        &pool,
        &IssueQuery {
            raised_by: Some(issue.raised_by),
            status: Some(STATUS_OPEN.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_raiser.len(), 1);
}
