//! Route definitions for the `/subtasks` resource.
//!
//! Creation is event-scoped and lives under `/events/{id}/subtasks`.

use axum::routing::put;
use axum::Router;

use crate::handlers::subtasks;
use crate::state::AppState;

/// Routes mounted at `/subtasks`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(subtasks::update_subtask).delete(subtasks::delete_subtask),
    )
}
