//! Assignment entity models and DTOs.
//!
//! One row per (event, employee) pair. `sim_sold`/`ftth_sold` are running
//! totals folded in by the sales submission path; they are incremented,
//! never recomputed, so a lost update leaves them permanently behind the
//! sales entries. The detail view exposes recomputed sums next to them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fieldops_core::types::{DbId, Timestamp};

/// A team-member assignment with individual targets and running totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub event_id: DbId,
    pub employee_id: DbId,
    pub sim_target: i32,
    pub ftth_target: i32,
    pub sim_sold: i32,
    pub ftth_sold: i32,
    pub assigned_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for the bulk team assignment (overwrites the event's
/// denormalized team list with exactly this set).
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTeam {
    pub employee_ids: Vec<DbId>,
    pub assigned_by: DbId,
}

/// Request body for upserting a single member with targets.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTeamMember {
    pub employee_id: DbId,
    pub sim_target: i32,
    pub ftth_target: i32,
    pub assigned_by: DbId,
}

/// Request body for removing a member.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveTeamMember {
    pub removed_by: DbId,
}

/// Request body for updating a member's targets in place.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTargets {
    pub sim_target: i32,
    pub ftth_target: i32,
    pub updated_by: DbId,
}

/// An event joined with the requesting employee's own assignment, for the
/// "my assigned events" listing.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedEvent {
    #[serde(flatten)]
    pub event: crate::models::event::Event,
    pub assignment: Assignment,
}
