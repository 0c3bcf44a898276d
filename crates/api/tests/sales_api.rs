//! Integration tests for sales submission, aggregation, and the composite
//! detail view.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, build_test_app, create_event, get, post_json, seed_employee};
use fieldops_db::repositories::{AssignmentRepo, SalesEntryRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_increments_assignment_counters_exactly(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "mgr").await;
    let staff = seed_employee(&pool, "staff").await;
    let event_id = create_event(&app, manager.id, "Counter Fair").await;

    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/team/members"),
        serde_json::json!({
            "employee_id": staff.id,
            "sim_target": 50,
            "ftth_target": 20,
            "assigned_by": manager.id,
        }),
    )
    .await;

    for (sims, ftth) in [(5, 2), (3, 1)] {
        let response = post_json(
            &app,
            &format!("/api/v1/events/{event_id}/sales"),
            serde_json::json!({
                "employee_id": staff.id,
                "sims_sold": sims,
                "sims_activated": sims,
                "ftth_sold": ftth,
                "ftth_activated": 0,
                "customer_type": "B2C",
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let assignment = AssignmentRepo::find_by_event_and_employee(&pool, event_id, staff.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.sim_sold, 8);
    assert_eq!(assignment.ftth_sold, 3);

    let entries = SalesEntryRepo::list_for_event(&pool, event_id).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_without_assignment_records_entry_only(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "mgr").await;
    let outsider = seed_employee(&pool, "outsider").await;
    let event_id = create_event(&app, manager.id, "Outsider Fair").await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/sales"),
        serde_json::json!({
            "employee_id": outsider.id,
            "sims_sold": 4,
            "sims_activated": 4,
            "ftth_sold": 2,
            "ftth_activated": 1,
            "customer_type": "B2B",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The entry exists; no assignment row appeared.
    let entries = SalesEntryRepo::list_for_event(&pool, event_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(
        AssignmentRepo::find_by_event_and_employee(&pool, event_id, outsider.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_rejects_negative_quantities_before_any_write(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "mgr").await;
    let event_id = create_event(&app, manager.id, "Validation Fair").await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/sales"),
        serde_json::json!({
            "employee_id": manager.id,
            "sims_sold": -1,
            "sims_activated": 0,
            "ftth_sold": 0,
            "ftth_activated": 0,
            "customer_type": "B2C",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let entries = SalesEntryRepo::list_for_event(&pool, event_id).await.unwrap();
    assert!(entries.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn details_recompute_sums_independently_of_drifted_counters(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let manager = seed_employee(&pool, "mgr").await;
    let staff = seed_employee(&pool, "staff").await;
    let event_id = create_event(&app, manager.id, "Drift Fair").await;

    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/team/members"),
        serde_json::json!({
            "employee_id": staff.id,
            "sim_target": 50,
            "ftth_target": 20,
            "assigned_by": manager.id,
        }),
    )
    .await;

    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/sales"),
        serde_json::json!({
            "employee_id": staff.id,
            "sims_sold": 6,
            "sims_activated": 5,
            "ftth_sold": 2,
            "ftth_activated": 2,
            "customer_type": "B2C",
        }),
    )
    .await;

    // Simulate a lost update: the stored counter falls behind the entries.
    sqlx::query("UPDATE assignments SET sim_sold = 1, ftth_sold = 0 WHERE event_id = $1")
        .bind(event_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(&app, &format!("/api/v1/events/{event_id}/details")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    let member = &data["team"][0];
    // Stored (drifted) counters are exposed as-is...
    assert_eq!(member["sim_sold"], 1);
    assert_eq!(member["ftth_sold"], 0);
    // ...next to sums recomputed from the entries.
    assert_eq!(member["actual_sim_sold"], 6);
    assert_eq!(member["actual_ftth_sold"], 2);

    assert_eq!(data["summary"]["total_sims_sold"], 6);
    assert_eq!(data["summary"]["total_ftth_sold"], 2);
    assert_eq!(data["summary"]["total_entries"], 1);
    assert_eq!(data["summary"]["team_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn details_for_unknown_event_returns_null(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = get(&app, "/api/v1/events/9999/details").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].is_null());
}
