//! Handlers for reading and acknowledging in-app notifications.
//!
//! Rows are written only by the dispatcher task; these endpoints serve the
//! client's inbox.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use fieldops_core::types::DbId;
use fieldops_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the notification listing.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub employee_id: DbId,
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for endpoints that only need the employee.
#[derive(Debug, Deserialize)]
pub struct EmployeeParam {
    pub employee_id: DbId,
}

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50).min(200);
    let offset = params.offset.unwrap_or(0);

    let notifications = NotificationRepo::list_for_employee(
        &state.pool,
        params.employee_id,
        params.unread_only.unwrap_or(false),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Query(params): Query<EmployeeParam>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.pool, params.employee_id).await?;
    Ok(Json(DataResponse { data: count }))
}

/// POST /notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EmployeeParam>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_read(&state.pool, id, input.employee_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "updated": updated }),
    }))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Json(input): Json<EmployeeParam>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::mark_all_read(&state.pool, input.employee_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "updated": count }),
    }))
}
