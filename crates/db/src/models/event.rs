//! Event entity models, DTOs, and the composite detail view.
//!
//! `assigned_team` is a denormalized cache of the assignment relation kept
//! in sync by the team-assignment operations; the assignment rows remain
//! the normalized source of truth.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fieldops_core::types::{DbId, Timestamp};

use crate::models::employee::Employee;
use crate::models::sales::SalesEntry;
use crate::models::subtask::Subtask;

// ---------------------------------------------------------------------------
// Event entity
// ---------------------------------------------------------------------------

/// A promotional field event (mela, fair, exhibition).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub circle: String,
    pub zone: String,
    pub category: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub target_sim: i32,
    pub target_ftth: i32,
    pub allocated_sim: i32,
    pub allocated_ftth: i32,
    pub key_insight: Option<String>,
    /// Ordered employee ids; denormalized mirror of the assignment rows.
    pub assigned_team: Vec<DbId>,
    pub status: String,
    /// Optional single event manager.
    pub assigned_to: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub circle: String,
    #[validate(length(min = 1, max = 100))]
    pub zone: String,
    pub category: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub target_sim: i32,
    pub target_ftth: i32,
    pub allocated_sim: i32,
    pub allocated_ftth: i32,
    pub key_insight: Option<String>,
    pub assigned_team: Option<Vec<DbId>>,
    /// Event manager by id, or by staff code when the id is unknown to the
    /// caller.
    pub assigned_to: Option<DbId>,
    pub assigned_to_staff_code: Option<String>,
    pub created_by: DbId,
}

/// DTO for partially updating an event.
///
/// Serializes (minus the actor) as the audit entry's change payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub circle: Option<String>,
    pub zone: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub target_sim: Option<i32>,
    pub target_ftth: Option<i32>,
    pub allocated_sim: Option<i32>,
    pub allocated_ftth: Option<i32>,
    pub key_insight: Option<String>,
    pub assigned_team: Option<Vec<DbId>>,
    pub assigned_to: Option<DbId>,
    #[serde(skip_serializing)]
    pub updated_by: DbId,
}

/// Request body for the status-update operation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventStatus {
    pub status: String,
    pub updated_by: DbId,
}

/// Request body for the soft-delete operation.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEvent {
    pub deleted_by: DbId,
}

// ---------------------------------------------------------------------------
// Composite detail view
// ---------------------------------------------------------------------------

/// One team member in the detail view: the assignment row joined with the
/// employee record and *recomputed* sales totals.
///
/// `actual_sim_sold`/`actual_ftth_sold` are summed from the sales entries
/// at read time; the assignment's stored `sim_sold`/`ftth_sold` counters
/// are exposed alongside them and may have drifted.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberDetail {
    #[serde(flatten)]
    pub assignment: crate::models::assignment::Assignment,
    pub employee: Option<Employee>,
    pub actual_sim_sold: i64,
    pub actual_ftth_sold: i64,
    pub sales_entries: Vec<SalesEntry>,
}

/// A subtask joined with its resolved assignee.
#[derive(Debug, Clone, Serialize)]
pub struct SubtaskDetail {
    #[serde(flatten)]
    pub subtask: Subtask,
    pub assigned_employee: Option<Employee>,
}

/// Per-status subtask counts.
#[derive(Debug, Clone, Serialize)]
pub struct SubtaskStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
}

/// Event-wide summary statistics, recomputed from the sales entries.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub total_sims_sold: i64,
    pub total_ftth_sold: i64,
    pub total_entries: i64,
    pub team_count: i64,
    pub subtask_stats: SubtaskStats,
}

/// The full composite view returned by the event-details read.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub assigned_to_employee: Option<Employee>,
    pub team: Vec<TeamMemberDetail>,
    pub sales_entries: Vec<SalesEntry>,
    pub subtasks: Vec<SubtaskDetail>,
    pub summary: EventSummary,
}
