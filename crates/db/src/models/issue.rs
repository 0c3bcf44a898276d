//! Issue entity models and DTOs.
//!
//! The timeline is stored as a JSONB array of
//! [`TimelineEntry`](fieldops_core::issue::TimelineEntry) records. Updates
//! always write the previous list plus one appended entry; past entries are
//! never rewritten.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use fieldops_core::issue::TimelineEntry;
use fieldops_core::types::{DbId, Timestamp};

/// A field-reported issue against an event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Issue {
    pub id: DbId,
    pub event_id: DbId,
    pub raised_by: DbId,
    pub issue_type: String,
    pub description: String,
    pub status: String,
    pub escalated_to: Option<DbId>,
    pub timeline: Json<Vec<TimelineEntry>>,
    /// Stamped only on transition into RESOLVED or CLOSED.
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for raising an issue.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIssue {
    pub event_id: DbId,
    pub raised_by: DbId,
    pub issue_type: String,
    #[validate(length(min = 1, max = 4000))]
    pub description: String,
    pub escalated_to: Option<DbId>,
}

/// Request body for a status change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateIssueStatus {
    pub status: String,
    pub updated_by: DbId,
    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}

/// Request body for an escalation.
#[derive(Debug, Clone, Deserialize)]
pub struct EscalateIssue {
    pub escalated_to: DbId,
    pub escalated_by: DbId,
}

/// Filter parameters for issue listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueQuery {
    pub event_id: Option<DbId>,
    pub status: Option<String>,
    pub raised_by: Option<DbId>,
}
