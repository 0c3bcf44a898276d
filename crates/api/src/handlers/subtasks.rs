//! Handlers for event subtasks.
//!
//! Creating a subtask with an assignee who holds no assignment on the
//! event implicitly creates one (zero targets) and syncs the team list,
//! with its own `AUTO_ASSIGN_TEAM_MEMBER` audit entry before the subtask's
//! `CREATE_SUBTASK` entry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fieldops_core::error::CoreError;
use fieldops_core::subtask::{validate_priority, validate_status};
use fieldops_core::types::DbId;
use fieldops_db::models::subtask::{CreateSubtask, DeleteSubtask, UpdateSubtask};
use fieldops_db::repositories::{
    AssignmentRepo, AuditLogRepo, EmployeeRepo, EventRepo, SubtaskRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::events::ensure_event_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /events/{id}/subtasks
pub async fn create_subtask(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateSubtask>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(ref priority) = input.priority {
        validate_priority(priority).map_err(CoreError::Validation)?;
    }

    let event = ensure_event_exists(&state.pool, event_id).await?;

    // Resolve the assignee: explicit id wins, then staff code. An unknown
    // staff code leaves the subtask unassigned.
    let mut assigned_to = input.assigned_to;
    if assigned_to.is_none() {
        if let Some(ref code) = input.staff_code {
            assigned_to = EmployeeRepo::find_by_employee_no(&state.pool, code)
                .await?
                .map(|e| e.id);
        }
    }

    if let Some(assignee) = assigned_to {
        let existing =
            AssignmentRepo::find_by_event_and_employee(&state.pool, event_id, assignee).await?;
        if existing.is_none() {
            AssignmentRepo::create(&state.pool, event_id, assignee, 0, 0, input.created_by)
                .await?;

            if !event.assigned_team.contains(&assignee) {
                let mut team = event.assigned_team.clone();
                team.push(assignee);
                EventRepo::set_assigned_team(&state.pool, event_id, &team).await?;
            }

            AuditLogRepo::append(
                &state.pool,
                "AUTO_ASSIGN_TEAM_MEMBER",
                "EVENT",
                event_id,
                input.created_by,
                serde_json::json!({ "employeeId": assignee, "reason": "subtask_assignment" }),
            )
            .await?;
        }
    }

    let subtask = SubtaskRepo::create(&state.pool, event_id, &input, assigned_to).await?;

    AuditLogRepo::append(
        &state.pool,
        "CREATE_SUBTASK",
        "EVENT",
        event_id,
        input.created_by,
        serde_json::json!({
            "subtaskId": subtask.id,
            "title": subtask.title,
            "assignedTo": assigned_to,
        }),
    )
    .await?;

    tracing::info!(event_id, subtask_id = subtask.id, "Subtask created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: subtask })))
}

/// PUT /subtasks/{id}
///
/// Partial update; moving the status to `completed` stamps the completion
/// metadata with the updater.
pub async fn update_subtask(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubtask>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(ref status) = input.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }
    if let Some(ref priority) = input.priority {
        validate_priority(priority).map_err(CoreError::Validation)?;
    }

    let subtask = SubtaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }))?;

    AuditLogRepo::append(
        &state.pool,
        "UPDATE_SUBTASK",
        "EVENT",
        subtask.event_id,
        input.updated_by,
        serde_json::json!({ "subtaskId": id, "status": input.status, "priority": input.priority }),
    )
    .await?;

    Ok(Json(DataResponse { data: subtask }))
}

/// DELETE /subtasks/{id}
pub async fn delete_subtask(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeleteSubtask>,
) -> AppResult<impl IntoResponse> {
    let subtask = SubtaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }))?;

    SubtaskRepo::delete(&state.pool, id).await?;

    AuditLogRepo::append(
        &state.pool,
        "DELETE_SUBTASK",
        "EVENT",
        subtask.event_id,
        input.deleted_by,
        serde_json::json!({ "subtaskId": id, "title": subtask.title }),
    )
    .await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "success": true }),
    }))
}
