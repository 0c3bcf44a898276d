//! Integration tests for the audit log and notification repositories.

mod common;

use sqlx::PgPool;

use common::{seed_employee, seed_event};
use fieldops_db::models::audit::AuditQuery;
use fieldops_db::repositories::{AuditLogRepo, NotificationRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_append_and_filtered_query(pool: PgPool) {
    let actor = seed_employee(&pool, "actor").await;
    let event = seed_event(&pool, "Night Bazaar", actor.id).await;

    AuditLogRepo::append(
        &pool,
        "CREATE_EVENT",
        "EVENT",
        event.id,
        actor.id,
        serde_json::json!({ "eventName": event.name }),
    )
    .await
    .unwrap();
    AuditLogRepo::append(
        &pool,
        "UPDATE_EVENT_STATUS",
        "EVENT",
        event.id,
        actor.id,
        serde_json::json!({ "status": "paused" }),
    )
    .await
    .unwrap();

    let all = AuditLogRepo::query(&pool, &AuditQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = AuditLogRepo::query(
        &pool,
        &AuditQuery {
            action: Some("CREATE_EVENT".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].details["eventName"], event.name.as_str());

    let count = AuditLogRepo::count(
        &pool,
        &AuditQuery {
            entity_type: Some("EVENT".to_string()),
            entity_id: Some(event.id),
            performed_by: Some(actor.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notification_read_lifecycle(pool: PgPool) {
    let recipient = seed_employee(&pool, "recipient").await;
    let other = seed_employee(&pool, "other").await;

    let id = NotificationRepo::create(
        &pool,
        recipient.id,
        "ISSUE_RAISED",
        "New Issue Reported",
        "EQUIPMENT issue reported at Night Bazaar by Asha",
        &serde_json::json!({ "issue_id": 1 }),
    )
    .await
    .unwrap();
    NotificationRepo::create(
        &pool,
        recipient.id,
        "ISSUE_RESOLVED",
        "Issue Resolved",
        "Your EQUIPMENT issue was resolved by Ravi",
        &serde_json::json!({ "issue_id": 1 }),
    )
    .await
    .unwrap();

    assert_eq!(NotificationRepo::unread_count(&pool, recipient.id).await.unwrap(), 2);

    // Another employee cannot acknowledge someone else's notification.
    assert!(!NotificationRepo::mark_read(&pool, id, other.id).await.unwrap());
    assert!(NotificationRepo::mark_read(&pool, id, recipient.id).await.unwrap());
    // Re-reading an already-read notification reports no change.
    assert!(!NotificationRepo::mark_read(&pool, id, recipient.id).await.unwrap());

    let unread = NotificationRepo::list_for_employee(&pool, recipient.id, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].kind, "ISSUE_RESOLVED");

    assert_eq!(NotificationRepo::mark_all_read(&pool, recipient.id).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, recipient.id).await.unwrap(), 0);
}
