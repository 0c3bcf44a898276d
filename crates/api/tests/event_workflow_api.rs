//! Integration tests for event creation, subtask side effects, and audit
//! trail coverage.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_event, delete_json, post_json, put_json, seed_employee,
};
use fieldops_db::repositories::{AssignmentRepo, EventRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_event_with_manager_implicitly_assigns_them(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let creator = seed_employee(&pool, "creator").await;
    let manager = seed_employee(&pool, "manager").await;

    let now = chrono::Utc::now();
    let response = post_json(
        &app,
        "/api/v1/events",
        serde_json::json!({
            "name": "Managed Fair",
            "location": "Nagpur",
            "circle": "MAHARASHTRA",
            "zone": "East",
            "category": "Exhibition",
            "start_date": now,
            "end_date": now + chrono::Duration::days(2),
            "target_sim": 80,
            "target_ftth": 40,
            "allocated_sim": 100,
            "allocated_ftth": 50,
            "assigned_to": manager.id,
            "created_by": creator.id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // The manager holds a zero-target assignment and seeds the team list.
    let assignment = AssignmentRepo::find_by_event_and_employee(&pool, event_id, manager.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.sim_target, 0);
    assert_eq!(assignment.assigned_by, creator.id);

    let event = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.assigned_team, vec![manager.id]);

    // Both the implicit assignment and the creation are audited separately.
    let actions: Vec<String> = sqlx::query_scalar(
        "SELECT action FROM audit_logs WHERE entity_type = 'EVENT' AND entity_id = $1 ORDER BY id",
    )
    .bind(event_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(actions, vec!["AUTO_ASSIGN_TEAM_MEMBER", "CREATE_EVENT"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_event_resolves_manager_by_staff_code(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let creator = seed_employee(&pool, "creator").await;
    let manager = seed_employee(&pool, "manager").await;

    let now = chrono::Utc::now();
    let response = post_json(
        &app,
        "/api/v1/events",
        serde_json::json!({
            "name": "Code Fair",
            "location": "Mumbai",
            "circle": "MAHARASHTRA",
            "zone": "West",
            "category": "Festival",
            "start_date": now,
            "end_date": now + chrono::Duration::days(1),
            "target_sim": 10,
            "target_ftth": 5,
            "allocated_sim": 10,
            "allocated_ftth": 5,
            "assigned_to_staff_code": manager.employee_no,
            "created_by": creator.id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let event = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.assigned_to, Some(manager.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subtask_with_new_assignee_creates_assignment_and_audits_it(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "manager").await;
    let staff = seed_employee(&pool, "staff").await;
    let event_id = create_event(&app, manager.id, "Subtask Fair").await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/subtasks"),
        serde_json::json!({
            "title": "Set up demo counter",
            "assigned_to": staff.id,
            "priority": "high",
            "created_by": manager.id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let subtask = body_json(response).await;
    assert_eq!(subtask["data"]["priority"], "high");
    assert_eq!(subtask["data"]["status"], "pending");

    // The assignee now holds a zero-target assignment and is on the team.
    let assignment = AssignmentRepo::find_by_event_and_employee(&pool, event_id, staff.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.sim_target, 0);

    let event = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert!(event.assigned_team.contains(&staff.id));

    let actions: Vec<String> = sqlx::query_scalar(
        "SELECT action FROM audit_logs WHERE entity_type = 'EVENT' AND entity_id = $1 ORDER BY id",
    )
    .bind(event_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(actions.contains(&"AUTO_ASSIGN_TEAM_MEMBER".to_string()));
    assert!(actions.contains(&"CREATE_SUBTASK".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_a_subtask_stamps_completion_metadata(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "manager").await;
    let event_id = create_event(&app, manager.id, "Completion Fair").await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/subtasks"),
        serde_json::json!({ "title": "Hang banners", "created_by": manager.id }),
    )
    .await;
    let subtask_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/v1/subtasks/{subtask_id}"),
        serde_json::json!({ "status": "completed", "updated_by": manager.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["completed_by"], manager.id);
    assert!(!json["data"]["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_subtask_audits_its_title(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "manager").await;
    let event_id = create_event(&app, manager.id, "Delete Fair").await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/subtasks"),
        serde_json::json!({ "title": "Old task", "created_by": manager.id }),
    )
    .await;
    let subtask_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete_json(
        &app,
        &format!("/api/v1/subtasks/{subtask_id}"),
        serde_json::json!({ "deleted_by": manager.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let details: serde_json::Value = sqlx::query_scalar(
        "SELECT details FROM audit_logs WHERE action = 'DELETE_SUBTASK' AND entity_id = $1",
    )
    .bind(event_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(details["title"], "Old task");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_delete_hides_nothing_but_flips_status(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "manager").await;
    let event_id = create_event(&app, manager.id, "Gone Fair").await;

    let response = delete_json(
        &app,
        &format!("/api/v1/events/{event_id}"),
        serde_json::json!({ "deleted_by": manager.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.status, "deleted");
}
