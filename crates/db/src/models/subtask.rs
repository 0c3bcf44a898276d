//! Subtask entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fieldops_core::types::{DbId, Timestamp};

/// A unit of work attached to an event, optionally assigned to one
/// employee.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub event_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completed_by: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subtask.
///
/// Assigning to an employee with no assignment on the event implicitly
/// creates one (zero targets) before the subtask insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubtask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    /// Assignee by staff code when the id is unknown to the caller.
    pub staff_code: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub created_by: DbId,
}

/// DTO for partially updating a subtask.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubtask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub updated_by: DbId,
}

/// Request body for deleting a subtask.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSubtask {
    pub deleted_by: DbId,
}
