//! Shared harness for API integration tests.
//!
//! Builds the full application router with the production middleware stack
//! and a live notification dispatcher, so tests exercise the same pipeline
//! the server runs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use fieldops_api::config::ServerConfig;
use fieldops_api::routes;
use fieldops_api::state::AppState;
use fieldops_core::types::DbId;
use fieldops_db::models::employee::{CreateEmployee, Employee};
use fieldops_db::repositories::EmployeeRepo;
use fieldops_events::{NotificationBus, NotificationDispatcher};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. A notification dispatcher is spawned against the
/// same pool so published notifications land in the `notifications` table.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let notifier = Arc::new(NotificationBus::default());

    tokio::spawn(NotificationDispatcher::new(pool.clone()).run(notifier.subscribe()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        notifier,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:8081".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a request with a JSON body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// Issue a PUT request with a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

/// Issue a DELETE request with a JSON body.
pub async fn delete_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::DELETE, uri, body).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert an employee with unique contact fields derived from `tag`.
pub async fn seed_employee(pool: &PgPool, tag: &str) -> Employee {
    let tag_hash: u64 = tag
        .bytes()
        .enumerate()
        .map(|(i, b)| (i as u64 + 1) * u64::from(b))
        .sum();
    let dto = CreateEmployee {
        name: format!("Employee {tag}"),
        email: format!("{tag}@fieldops.test"),
        phone: format!("98{:08}", tag_hash % 100_000_000),
        employee_no: format!("EMP-{tag}"),
        designation: "Field Executive".to_string(),
        role: "SALES_STAFF".to_string(),
        circle: "MAHARASHTRA".to_string(),
    };
    EmployeeRepo::create(pool, &dto)
        .await
        .expect("employee insert should succeed")
}

/// Create an event over HTTP; returns its id.
pub async fn create_event(app: &Router, created_by: DbId, name: &str) -> DbId {
    let now = chrono::Utc::now();
    let response = post_json(
        app,
        "/api/v1/events",
        serde_json::json!({
            "name": name,
            "location": "Pune",
            "circle": "MAHARASHTRA",
            "zone": "West",
            "category": "Fair",
            "start_date": now - chrono::Duration::days(1),
            "end_date": now + chrono::Duration::days(3),
            "target_sim": 100,
            "target_ftth": 50,
            "allocated_sim": 120,
            "allocated_ftth": 60,
            "created_by": created_by,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Wait (bounded) for the dispatcher to land `expected` notification rows
/// for an employee.
pub async fn wait_for_notifications(pool: &PgPool, employee_id: DbId, expected: i64) -> i64 {
    for _ in 0..50 {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(pool)
                .await
                .unwrap();
        if count >= expected {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE employee_id = $1")
        .bind(employee_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Total notification rows for an employee (no waiting).
pub async fn notification_count(pool: &PgPool, employee_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE employee_id = $1")
        .bind(employee_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
