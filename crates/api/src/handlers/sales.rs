//! Handlers for sales submission and listing.
//!
//! Submission folds the entry into the matching assignment's running
//! counters with a read-then-write (no atomic increment, no
//! compare-and-swap): two concurrent submissions against the same
//! assignment can lose an increment to a stale snapshot. The detail view
//! recomputes sums from the entries, so drift is observable there.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fieldops_core::error::CoreError;
use fieldops_core::sales::validate_customer_type;
use fieldops_core::types::DbId;
use fieldops_db::models::sales::CreateSalesEntry;
use fieldops_db::repositories::{AssignmentRepo, AuditLogRepo, SalesEntryRepo};

use crate::error::AppResult;
use crate::handlers::events::ensure_event_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /events/{id}/sales
///
/// Record an immutable sales entry and fold it into the submitter's
/// assignment counters. An employee with no assignment still gets their
/// entry recorded; no counter is touched and no error is raised.
pub async fn submit_event_sales(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateSalesEntry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_customer_type(&input.customer_type).map_err(CoreError::Validation)?;

    ensure_event_exists(&state.pool, event_id).await?;

    let entry = SalesEntryRepo::create(&state.pool, event_id, &input).await?;

    let assignment =
        AssignmentRepo::find_by_event_and_employee(&state.pool, event_id, input.employee_id)
            .await?;
    if let Some(assignment) = assignment {
        AssignmentRepo::update_sold(
            &state.pool,
            assignment.id,
            assignment.sim_sold + input.sims_sold,
            assignment.ftth_sold + input.ftth_sold,
        )
        .await?;
    }

    AuditLogRepo::append(
        &state.pool,
        "SUBMIT_EVENT_SALES",
        "SALES",
        entry.id,
        input.employee_id,
        serde_json::json!({
            "eventId": event_id,
            "simsSold": input.sims_sold,
            "ftthSold": input.ftth_sold,
        }),
    )
    .await?;

    tracing::info!(
        event_id,
        employee_id = input.employee_id,
        sims_sold = input.sims_sold,
        ftth_sold = input.ftth_sold,
        "Sales entry recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /events/{id}/sales
///
/// All sales entries for an event, newest first.
pub async fn list_event_sales(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = SalesEntryRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
