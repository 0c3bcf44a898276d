//! Employee directory entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fieldops_core::types::{DbId, Timestamp};

/// A registered employee. Resolvable by id or by staff code
/// (`employee_no`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub employee_no: String,
    pub designation: String,
    pub role: String,
    pub circle: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new employee.
///
/// `email`, `phone`, and `employee_no` are unique; violations surface as
/// conflicts, not validation errors.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10, max = 15))]
    pub phone: String,
    #[validate(length(min = 1, max = 50))]
    pub employee_no: String,
    #[validate(length(min = 1, max = 100))]
    pub designation: String,
    pub role: String,
    pub circle: String,
}

/// Filter parameters for employee listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    pub circle: Option<String>,
    pub active_only: Option<bool>,
    /// When set, each employee is annotated with whether they already hold
    /// an assignment on this event.
    pub event_id: Option<DbId>,
}

/// An employee annotated with assignment membership for a specific event.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableTeamMember {
    #[serde(flatten)]
    pub employee: Employee,
    pub is_assigned: bool,
}
