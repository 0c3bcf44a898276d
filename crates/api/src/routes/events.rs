//! Route definitions for the `/events` resource and its nested
//! team/sales/subtask operations.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{events, sales, subtasks, team};
use crate::state::AppState;

/// Routes mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new()
        // Event CRUD and listings
        .route("/", get(events::list_events).post(events::create_event))
        .route("/active", get(events::list_active_events))
        .route("/upcoming", get(events::list_upcoming_events))
        .route("/circle/{circle}", get(events::list_events_by_circle))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/{id}/status", put(events::update_event_status))
        .route("/{id}/details", get(events::get_event_details))
        // Team assignment / reconciliation
        .route("/{id}/team", post(team::assign_team))
        .route("/{id}/team/members", post(team::assign_team_member))
        .route("/{id}/team/{employee_id}", delete(team::remove_team_member))
        .route(
            "/{id}/team/{employee_id}/targets",
            put(team::update_team_member_targets),
        )
        // Sales
        .route(
            "/{id}/sales",
            get(sales::list_event_sales).post(sales::submit_event_sales),
        )
        // Subtasks (updates and deletes live under /subtasks)
        .route("/{id}/subtasks", post(subtasks::create_subtask))
}
