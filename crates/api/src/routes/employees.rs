//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{employees, team};
use crate::state::AppState;

/// Routes mounted at `/employees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employees::list_employees).post(employees::register_employee),
        )
        .route("/code/{employee_no}", get(employees::get_employee_by_code))
        .route("/{id}", get(employees::get_employee))
        .route("/{id}/events", get(team::my_assigned_events))
}
