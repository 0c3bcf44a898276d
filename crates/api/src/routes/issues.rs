//! Route definitions for the `/issues` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Routes mounted at `/issues`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issues::list_issues).post(issues::create_issue))
        .route("/open-count", get(issues::open_count))
        .route("/{id}", get(issues::get_issue))
        .route("/{id}/status", put(issues::update_issue_status))
        .route("/{id}/escalate", post(issues::escalate_issue))
}
