pub mod audit;
pub mod employees;
pub mod events;
pub mod health;
pub mod issues;
pub mod notifications;
pub mod subtasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                    list, create
/// /events/active                             active events (GET)
/// /events/upcoming                           upcoming events (GET)
/// /events/circle/{circle}                    events by circle (GET)
/// /events/{id}                               get, update, soft-delete
/// /events/{id}/status                        update status (PUT)
/// /events/{id}/details                       composite detail view (GET)
/// /events/{id}/team                          bulk assign (POST)
/// /events/{id}/team/members                  upsert member (POST)
/// /events/{id}/team/{employee_id}            remove member (DELETE)
/// /events/{id}/team/{employee_id}/targets    update targets (PUT)
/// /events/{id}/sales                         list, submit
/// /events/{id}/subtasks                      create subtask (POST)
///
/// /subtasks/{id}                             update, delete
///
/// /issues                                    list (?event_id, status, raised_by), create
/// /issues/open-count                         open issue count (GET)
/// /issues/{id}                               get
/// /issues/{id}/status                        update status (PUT)
/// /issues/{id}/escalate                      escalate (POST)
///
/// /employees                                 list (?circle, active_only, event_id), register
/// /employees/code/{employee_no}              resolve by staff code (GET)
/// /employees/{id}                            get
/// /employees/{id}/events                     events assigned to employee (GET)
///
/// /notifications                             list (?employee_id, unread_only, limit, offset)
/// /notifications/unread-count                unread count (GET)
/// /notifications/read-all                    mark all read (POST)
/// /notifications/{id}/read                   mark read (POST)
///
/// /audit                                     query audit logs (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", events::router())
        .nest("/subtasks", subtasks::router())
        .nest("/issues", issues::router())
        .nest("/employees", employees::router())
        .nest("/notifications", notifications::router())
        .nest("/audit", audit::router())
}
