//! Health check endpoint, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Routes merged at the application root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Liveness plus a database round-trip. Always returns 200; a broken
/// database shows up as `db_healthy: false` so probes can distinguish
/// "process up" from "fully serving".
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = fieldops_db::health_check(&state.pool).await.is_ok();

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
