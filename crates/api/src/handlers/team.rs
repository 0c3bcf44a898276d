//! Handlers for team assignment and reconciliation.
//!
//! Every mutation here touches two stores in sequence: the normalized
//! `assignments` relation first, then the event's denormalized
//! `assigned_team` list. There is no transaction spanning the pair and no
//! compensating write if the second step fails; the list converges on the
//! next successful reconciliation.
//!
//! The bulk path and the single-member path deliberately diverge: bulk
//! assignment overwrites the list with exactly its input (dropping members
//! that were omitted but still hold assignment rows), while single-member
//! assignment appends.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fieldops_core::types::DbId;
use fieldops_db::models::assignment::{
    AssignTeam, AssignTeamMember, AssignedEvent, RemoveTeamMember, UpdateTargets,
};
use fieldops_db::repositories::{AssignmentRepo, AuditLogRepo, EventRepo};

use crate::error::AppResult;
use crate::handlers::events::ensure_event_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /events/{id}/team
///
/// Bulk-assign a team. Creates zero-target assignments for ids not already
/// present (idempotent per employee), then overwrites `assigned_team` with
/// exactly the input list.
pub async fn assign_team(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<AssignTeam>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    for employee_id in &input.employee_ids {
        AssignmentRepo::insert_ignore(&state.pool, event_id, *employee_id, input.assigned_by)
            .await?;
    }

    EventRepo::set_assigned_team(&state.pool, event_id, &input.employee_ids).await?;

    AuditLogRepo::append(
        &state.pool,
        "ASSIGN_TEAM",
        "EVENT",
        event_id,
        input.assigned_by,
        serde_json::json!({ "employeeIds": input.employee_ids }),
    )
    .await?;

    tracing::info!(
        event_id,
        team_size = input.employee_ids.len(),
        "Team assigned"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "success": true }),
    }))
}

/// POST /events/{id}/team/members
///
/// Upsert one member with targets. An existing assignment gets its targets
/// replaced; a new one is inserted and the employee id appended to
/// `assigned_team` if absent.
pub async fn assign_team_member(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<AssignTeamMember>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;

    let existing =
        AssignmentRepo::find_by_event_and_employee(&state.pool, event_id, input.employee_id)
            .await?;

    match existing {
        Some(_) => {
            AssignmentRepo::update_targets(
                &state.pool,
                event_id,
                input.employee_id,
                input.sim_target,
                input.ftth_target,
            )
            .await?;
        }
        None => {
            AssignmentRepo::create(
                &state.pool,
                event_id,
                input.employee_id,
                input.sim_target,
                input.ftth_target,
                input.assigned_by,
            )
            .await?;

            if !event.assigned_team.contains(&input.employee_id) {
                let mut team = event.assigned_team.clone();
                team.push(input.employee_id);
                EventRepo::set_assigned_team(&state.pool, event_id, &team).await?;
            }
        }
    }

    AuditLogRepo::append(
        &state.pool,
        "ASSIGN_TEAM_MEMBER",
        "EVENT",
        event_id,
        input.assigned_by,
        serde_json::json!({
            "employeeId": input.employee_id,
            "simTarget": input.sim_target,
            "ftthTarget": input.ftth_target,
        }),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: serde_json::json!({ "success": true }),
        }),
    ))
}

/// DELETE /events/{id}/team/{employee_id}
///
/// Remove a member: delete the assignment row, then filter the id out of
/// `assigned_team`. Two independent writes.
pub async fn remove_team_member(
    State(state): State<AppState>,
    Path((event_id, employee_id)): Path<(DbId, DbId)>,
    Json(input): Json<RemoveTeamMember>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;

    AssignmentRepo::delete(&state.pool, event_id, employee_id).await?;

    let team: Vec<DbId> = event
        .assigned_team
        .iter()
        .copied()
        .filter(|id| *id != employee_id)
        .collect();
    EventRepo::set_assigned_team(&state.pool, event_id, &team).await?;

    AuditLogRepo::append(
        &state.pool,
        "REMOVE_TEAM_MEMBER",
        "EVENT",
        event_id,
        input.removed_by,
        serde_json::json!({ "employeeId": employee_id }),
    )
    .await?;

    tracing::info!(event_id, employee_id, "Team member removed");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "success": true }),
    }))
}

/// PUT /events/{id}/team/{employee_id}/targets
///
/// Update-only: no assignment for the pair means no write happens, but the
/// operation still audits and succeeds with `data: null` (the caller
/// cannot distinguish a no-op from an update, matching the aggregation
/// contract).
pub async fn update_team_member_targets(
    State(state): State<AppState>,
    Path((event_id, employee_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTargets>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    let assignment = AssignmentRepo::update_targets(
        &state.pool,
        event_id,
        employee_id,
        input.sim_target,
        input.ftth_target,
    )
    .await?;

    AuditLogRepo::append(
        &state.pool,
        "UPDATE_TEAM_TARGETS",
        "EVENT",
        event_id,
        input.updated_by,
        serde_json::json!({
            "employeeId": employee_id,
            "simTarget": input.sim_target,
            "ftthTarget": input.ftth_target,
        }),
    )
    .await?;

    Ok(Json(DataResponse { data: assignment }))
}

/// GET /employees/{id}/events
///
/// Events the employee holds an assignment on, joined with that
/// assignment, latest start date first.
pub async fn my_assigned_events(
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_for_employee(&state.pool, employee_id).await?;
    if assignments.is_empty() {
        return Ok(Json(DataResponse {
            data: Vec::<AssignedEvent>::new(),
        }));
    }

    let event_ids: Vec<DbId> = assignments.iter().map(|a| a.event_id).collect();
    let events = EventRepo::list_by_ids(&state.pool, &event_ids).await?;

    let data: Vec<AssignedEvent> = events
        .into_iter()
        .filter_map(|event| {
            assignments
                .iter()
                .find(|a| a.event_id == event.id)
                .cloned()
                .map(|assignment| AssignedEvent { event, assignment })
        })
        .collect();

    Ok(Json(DataResponse { data }))
}
