//! Handlers for the employee directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fieldops_core::employee::validate_role;
use fieldops_core::error::CoreError;
use fieldops_core::event::validate_circle;
use fieldops_core::types::DbId;
use fieldops_db::models::employee::{AvailableTeamMember, CreateEmployee, EmployeeQuery};
use fieldops_db::repositories::{AssignmentRepo, EmployeeRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /employees
///
/// Register an employee. Email, phone, and staff code are unique;
/// duplicates surface as 409.
pub async fn register_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_role(&input.role).map_err(CoreError::Validation)?;
    validate_circle(&input.circle).map_err(CoreError::Validation)?;

    let employee = EmployeeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        employee_id = employee.id,
        employee_no = %employee.employee_no,
        "Employee registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /employees
///
/// List employees, optionally restricted to a circle and to active
/// records. When `event_id` is given, each employee is annotated with
/// whether they already hold an assignment on that event (team-picker
/// support).
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref circle) = params.circle {
        validate_circle(circle).map_err(CoreError::Validation)?;
    }

    let employees = EmployeeRepo::list(
        &state.pool,
        params.circle.as_deref(),
        params.active_only.unwrap_or(false),
    )
    .await?;

    let assigned_ids: Vec<DbId> = match params.event_id {
        Some(event_id) => AssignmentRepo::list_for_event(&state.pool, event_id)
            .await?
            .into_iter()
            .map(|a| a.employee_id)
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<AvailableTeamMember> = employees
        .into_iter()
        .map(|employee| AvailableTeamMember {
            is_assigned: assigned_ids.contains(&employee.id),
            employee,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    Ok(Json(DataResponse { data: employee }))
}

/// GET /employees/code/{employee_no}
///
/// Resolve an employee by staff code.
pub async fn get_employee_by_code(
    State(state): State<AppState>,
    Path(employee_no): Path<String>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_employee_no(&state.pool, &employee_no)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Employee",
                key: employee_no.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: employee }))
}
