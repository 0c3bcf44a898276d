//! Handlers for the issue lifecycle.
//!
//! Every mutation appends exactly one timeline entry, writes one audit
//! entry, and then publishes zero or more notifications according to the
//! decision table in `fieldops_core::notify`. Publishes come last and
//! cannot fail the operation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fieldops_core::error::CoreError;
use fieldops_core::issue::{
    creation_entry, escalation_action, is_resolution, status_change_action, validate_status,
    validate_type, TimelineEntry,
};
use fieldops_core::notify::{self, IssueParties, NotificationKind};
use fieldops_core::types::DbId;
use fieldops_db::models::issue::{CreateIssue, EscalateIssue, IssueQuery, UpdateIssueStatus};
use fieldops_db::repositories::{AuditLogRepo, EmployeeRepo, EventRepo, IssueRepo};
use fieldops_events::{NotificationContext, NotificationEvent};

use crate::error::{AppError, AppResult};
use crate::handlers::events::ensure_event_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve an employee's display name, falling back to a role label when
/// the directory has no record.
async fn resolve_name(pool: &fieldops_db::DbPool, id: DbId, fallback: &str) -> String {
    match EmployeeRepo::find_by_id(pool, id).await {
        Ok(Some(employee)) => employee.name,
        _ => fallback.to_string(),
    }
}

/// GET /issues
///
/// List issues, optionally filtered by event, status, or raiser.
pub async fn list_issues(
    State(state): State<AppState>,
    Query(params): Query<IssueQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }
    let issues = IssueRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: issues }))
}

/// GET /issues/open-count
///
/// Dashboard signal: number of issues currently OPEN.
pub async fn open_count(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = IssueRepo::count_open(&state.pool).await?;
    Ok(Json(DataResponse { data: count }))
}

/// GET /issues/{id}
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let issue = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Issue",
            id,
        }))?;
    Ok(Json(DataResponse { data: issue }))
}

/// POST /issues
///
/// Raise an issue. Starts OPEN with a seeded timeline; an optional
/// escalated-to employee is notified with the raiser's and event's names
/// (placeholder labels when resolution fails).
pub async fn create_issue(
    State(state): State<AppState>,
    Json(input): Json<CreateIssue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_type(&input.issue_type).map_err(CoreError::Validation)?;

    let event = ensure_event_exists(&state.pool, input.event_id).await?;

    let timeline = vec![creation_entry(input.raised_by, chrono::Utc::now())];
    let issue = IssueRepo::create(&state.pool, &input, timeline).await?;

    AuditLogRepo::append(
        &state.pool,
        "CREATE_ISSUE",
        "ISSUE",
        issue.id,
        input.raised_by,
        serde_json::json!({ "eventId": input.event_id, "type": input.issue_type }),
    )
    .await?;

    tracing::info!(
        issue_id = issue.id,
        event_id = input.event_id,
        issue_type = %input.issue_type,
        "Issue created"
    );

    for (recipient, kind) in notify::on_create(input.escalated_to) {
        let raised_by_name = resolve_name(&state.pool, input.raised_by, "Team Member").await;
        state.notifier.publish(NotificationEvent::new(
            recipient,
            kind,
            NotificationContext {
                issue_id: issue.id,
                issue_type: issue.issue_type.clone(),
                event_name: Some(event.name.clone()),
                actor_name: raised_by_name,
                status: None,
            },
        ));
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: issue })))
}

/// PUT /issues/{id}/status
///
/// Set any status from any other. Appends one timeline entry; a transition
/// into RESOLVED/CLOSED stamps the resolution metadata. Notification
/// fan-out follows the decision table: resolution notifies the raiser
/// (unless self-resolved), any other change notifies the raiser and the
/// escalated-to employee, skipping whoever performed the update.
pub async fn update_issue_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIssueStatus>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_status(&input.status).map_err(CoreError::Validation)?;

    let existing = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Issue",
            id,
        }))?;

    let now = chrono::Utc::now();
    let mut timeline = existing.timeline.0.clone();
    timeline.push(TimelineEntry::new(
        status_change_action(&input.status, input.remarks.as_deref()),
        input.updated_by,
        now,
    ));

    let (resolved_by, resolved_at) = if is_resolution(&input.status) {
        (Some(input.updated_by), Some(now))
    } else {
        (None, None)
    };

    let issue = IssueRepo::update_status(
        &state.pool,
        id,
        &input.status,
        timeline,
        resolved_by,
        resolved_at,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Issue",
        id,
    }))?;

    AuditLogRepo::append(
        &state.pool,
        "UPDATE_ISSUE_STATUS",
        "ISSUE",
        id,
        input.updated_by,
        serde_json::json!({ "status": input.status }),
    )
    .await?;

    tracing::info!(issue_id = id, status = %input.status, "Issue status updated");

    let recipients = notify::on_status_change(
        &input.status,
        IssueParties {
            raised_by: existing.raised_by,
            escalated_to: existing.escalated_to,
        },
        input.updated_by,
    );

    if !recipients.is_empty() {
        let updated_by_name = resolve_name(&state.pool, input.updated_by, "Manager").await;
        for (recipient, kind) in recipients {
            let status = match kind {
                NotificationKind::IssueStatusChanged => Some(input.status.clone()),
                _ => None,
            };
            state.notifier.publish(NotificationEvent::new(
                recipient,
                kind,
                NotificationContext {
                    issue_id: id,
                    issue_type: existing.issue_type.clone(),
                    event_name: None,
                    actor_name: updated_by_name.clone(),
                    status,
                },
            ));
        }
    }

    Ok(Json(DataResponse { data: issue }))
}

/// POST /issues/{id}/escalate
///
/// Redirect the issue to a new owner: sets `escalated_to`, forces the
/// status to IN_PROGRESS regardless of its prior value, appends one
/// timeline entry, and notifies the new owner.
pub async fn escalate_issue(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EscalateIssue>,
) -> AppResult<impl IntoResponse> {
    let existing = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Issue",
            id,
        }))?;

    let mut timeline = existing.timeline.0.clone();
    timeline.push(TimelineEntry::new(
        escalation_action(input.escalated_to),
        input.escalated_by,
        chrono::Utc::now(),
    ));

    let issue = IssueRepo::escalate(&state.pool, id, input.escalated_to, timeline)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Issue",
            id,
        }))?;

    AuditLogRepo::append(
        &state.pool,
        "ESCALATE_ISSUE",
        "ISSUE",
        id,
        input.escalated_by,
        serde_json::json!({ "escalatedTo": input.escalated_to }),
    )
    .await?;

    tracing::info!(
        issue_id = id,
        escalated_to = input.escalated_to,
        "Issue escalated"
    );

    let escalated_by_name = resolve_name(&state.pool, input.escalated_by, "Manager").await;
    let event_name = match EventRepo::find_by_id(&state.pool, existing.event_id).await {
        Ok(Some(event)) => event.name,
        _ => "Unknown Event".to_string(),
    };
    for (recipient, kind) in notify::on_escalate(input.escalated_to) {
        state.notifier.publish(NotificationEvent::new(
            recipient,
            kind,
            NotificationContext {
                issue_id: id,
                issue_type: existing.issue_type.clone(),
                event_name: Some(event_name.clone()),
                actor_name: escalated_by_name.clone(),
                status: None,
            },
        ));
    }

    Ok(Json(DataResponse { data: issue }))
}
