//! Audit log entity models and DTOs.
//!
//! Audit entries are append-only and immutable (no `updated_at`). They are
//! written after the primary effect of an operation and are not
//! transactionally tied to it: a failed append propagates, but the primary
//! write stands.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fieldops_core::types::{DbId, Timestamp};

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub action: String,
    pub entity_type: String,
    pub entity_id: DbId,
    pub performed_by: DbId,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub performed_by: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated response for audit log queries.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}
