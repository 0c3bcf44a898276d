//! Handler for querying the audit log.
//!
//! The core only ever appends; this read surface exists for the admin
//! screens.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use fieldops_db::models::audit::{AuditLogPage, AuditQuery};
use fieldops_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /audit
///
/// Filtered, paginated audit log listing, newest first.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<impl IntoResponse> {
    let items = AuditLogRepo::query(&state.pool, &params).await?;
    let total = AuditLogRepo::count(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}
