//! Handlers for event CRUD, lifecycle status, and the composite detail
//! view.
//!
//! Creation carries a cross-entity side effect: naming an event manager
//! implicitly creates their assignment and seeds the denormalized team
//! list, with its own audit entry distinct from `CREATE_EVENT`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fieldops_core::error::CoreError;
use fieldops_core::event::{validate_category, validate_circle, validate_settable_status};
use fieldops_core::subtask::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};
use fieldops_core::types::DbId;
use fieldops_db::models::event::{
    CreateEvent, DeleteEvent, Event, EventDetails, EventSummary, SubtaskDetail, SubtaskStats,
    TeamMemberDetail, UpdateEvent, UpdateEventStatus,
};
use fieldops_db::repositories::{
    AssignmentRepo, AuditLogRepo, EmployeeRepo, EventRepo, SalesEntryRepo, SubtaskRepo,
};
use fieldops_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Look up an event or fail with NOT_FOUND.
pub async fn ensure_event_exists(pool: &DbPool, event_id: DbId) -> Result<Event, AppError> {
    EventRepo::find_by_id(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))
}

/// GET /events
///
/// List all events, newest first.
pub async fn list_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /events/active
///
/// Events whose date window contains now and whose status is active.
pub async fn list_active_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_active(&state.pool, chrono::Utc::now()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /events/upcoming
///
/// Active events that have not started yet, soonest first.
pub async fn list_upcoming_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_upcoming(&state.pool, chrono::Utc::now()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /events/circle/{circle}
pub async fn list_events_by_circle(
    State(state): State<AppState>,
    Path(circle): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_circle(&circle).map_err(CoreError::Validation)?;
    let events = EventRepo::list_by_circle(&state.pool, &circle).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /events
///
/// Create an event. When a manager is named (by id or staff code), an
/// assignment with zero targets is created for them and the team list is
/// seeded with exactly that member.
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_circle(&input.circle).map_err(CoreError::Validation)?;
    validate_category(&input.category).map_err(CoreError::Validation)?;

    // Resolve the manager: explicit id wins, then staff code. A staff code
    // that resolves to nobody leaves the event unmanaged.
    let mut assigned_to = input.assigned_to;
    if assigned_to.is_none() {
        if let Some(ref code) = input.assigned_to_staff_code {
            assigned_to = EmployeeRepo::find_by_employee_no(&state.pool, code)
                .await?
                .map(|e| e.id);
        }
    }

    let event = EventRepo::create(&state.pool, &input, assigned_to).await?;

    if let Some(manager_id) = assigned_to {
        let existing =
            AssignmentRepo::find_by_event_and_employee(&state.pool, event.id, manager_id).await?;
        if existing.is_none() {
            AssignmentRepo::create(&state.pool, event.id, manager_id, 0, 0, input.created_by)
                .await?;
            EventRepo::set_assigned_team(&state.pool, event.id, &[manager_id]).await?;

            AuditLogRepo::append(
                &state.pool,
                "AUTO_ASSIGN_TEAM_MEMBER",
                "EVENT",
                event.id,
                input.created_by,
                serde_json::json!({ "employeeId": manager_id, "reason": "event_manager_assignment" }),
            )
            .await?;
        }
    }

    AuditLogRepo::append(
        &state.pool,
        "CREATE_EVENT",
        "EVENT",
        event.id,
        input.created_by,
        serde_json::json!({ "eventName": event.name }),
    )
    .await?;

    tracing::info!(event_id = event.id, name = %event.name, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(ref circle) = input.circle {
        validate_circle(circle).map_err(CoreError::Validation)?;
    }
    if let Some(ref category) = input.category {
        validate_category(category).map_err(CoreError::Validation)?;
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    AuditLogRepo::append(
        &state.pool,
        "UPDATE_EVENT",
        "EVENT",
        id,
        input.updated_by,
        serde_json::to_value(&input).unwrap_or_default(),
    )
    .await?;

    Ok(Json(DataResponse { data: event }))
}

/// PUT /events/{id}/status
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEventStatus>,
) -> AppResult<impl IntoResponse> {
    validate_settable_status(&input.status).map_err(CoreError::Validation)?;

    let event = EventRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    AuditLogRepo::append(
        &state.pool,
        "UPDATE_EVENT_STATUS",
        "EVENT",
        id,
        input.updated_by,
        serde_json::json!({ "status": input.status }),
    )
    .await?;

    tracing::info!(event_id = id, status = %input.status, "Event status updated");

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /events/{id}
///
/// Soft delete: the event is marked deleted, assignment and sales rows are
/// left in place.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeleteEvent>,
) -> AppResult<impl IntoResponse> {
    let removed = EventRepo::soft_delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }));
    }

    AuditLogRepo::append(
        &state.pool,
        "DELETE_EVENT",
        "EVENT",
        id,
        input.deleted_by,
        serde_json::json!({}),
    )
    .await?;

    tracing::info!(event_id = id, "Event soft-deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "success": true }),
    }))
}

/// GET /events/{id}/details
///
/// Composite view: the event, its resolved manager, every assignment
/// joined with its employee and *recomputed* sales sums, every subtask
/// with its assignee, and summary statistics.
///
/// The per-member `actual_sim_sold`/`actual_ftth_sold` are summed from the
/// sales entries at read time; the assignment rows' stored counters ride
/// along unchanged so callers can see both. Returns `data: null` for an
/// unknown id.
pub async fn get_event_details(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let Some(event) = EventRepo::find_by_id(&state.pool, id).await? else {
        return Ok(Json(DataResponse {
            data: None::<EventDetails>,
        }));
    };

    let assignments = AssignmentRepo::list_for_event(&state.pool, id).await?;
    let sales_entries = SalesEntryRepo::list_for_event(&state.pool, id).await?;
    let subtasks = SubtaskRepo::list_for_event(&state.pool, id).await?;

    // One batched lookup covering assignment holders and subtask assignees.
    let mut employee_ids: Vec<DbId> = assignments.iter().map(|a| a.employee_id).collect();
    employee_ids.extend(subtasks.iter().filter_map(|s| s.assigned_to));
    employee_ids.sort_unstable();
    employee_ids.dedup();
    let employees = EmployeeRepo::list_by_ids(&state.pool, &employee_ids).await?;

    let team: Vec<TeamMemberDetail> = assignments
        .into_iter()
        .map(|assignment| {
            let employee = employees
                .iter()
                .find(|e| e.id == assignment.employee_id)
                .cloned();
            let member_sales: Vec<_> = sales_entries
                .iter()
                .filter(|s| s.employee_id == assignment.employee_id)
                .cloned()
                .collect();
            let actual_sim_sold = member_sales.iter().map(|s| i64::from(s.sims_sold)).sum();
            let actual_ftth_sold = member_sales.iter().map(|s| i64::from(s.ftth_sold)).sum();
            TeamMemberDetail {
                assignment,
                employee,
                actual_sim_sold,
                actual_ftth_sold,
                sales_entries: member_sales,
            }
        })
        .collect();

    let subtask_stats = SubtaskStats {
        total: subtasks.len() as i64,
        completed: subtasks.iter().filter(|s| s.status == STATUS_COMPLETED).count() as i64,
        pending: subtasks.iter().filter(|s| s.status == STATUS_PENDING).count() as i64,
        in_progress: subtasks.iter().filter(|s| s.status == STATUS_IN_PROGRESS).count() as i64,
    };

    let subtask_details: Vec<SubtaskDetail> = subtasks
        .into_iter()
        .map(|subtask| {
            let assigned_employee = subtask
                .assigned_to
                .and_then(|id| employees.iter().find(|e| e.id == id).cloned());
            SubtaskDetail {
                subtask,
                assigned_employee,
            }
        })
        .collect();

    let summary = EventSummary {
        total_sims_sold: sales_entries.iter().map(|s| i64::from(s.sims_sold)).sum(),
        total_ftth_sold: sales_entries.iter().map(|s| i64::from(s.ftth_sold)).sum(),
        total_entries: sales_entries.len() as i64,
        team_count: team.len() as i64,
        subtask_stats,
    };

    let assigned_to_employee = match event.assigned_to {
        Some(manager_id) => EmployeeRepo::find_by_id(&state.pool, manager_id).await?,
        None => None,
    };

    let details = EventDetails {
        event,
        assigned_to_employee,
        team,
        sales_entries,
        subtasks: subtask_details,
        summary,
    };

    Ok(Json(DataResponse {
        data: Some(details),
    }))
}
