//! Route definition for the `/audit` admin surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit::query_audit_logs))
}
