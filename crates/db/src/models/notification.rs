//! In-app notification entity model.
//!
//! Rows are written by the notification dispatcher, never by request
//! handlers directly.

use serde::Serialize;
use sqlx::FromRow;

use fieldops_core::types::{DbId, Timestamp};

/// A stored in-app notification for one employee.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub employee_id: DbId,
    /// Template kind (`ISSUE_RAISED`, `ISSUE_RESOLVED`,
    /// `ISSUE_STATUS_CHANGED`).
    pub kind: String,
    pub title: String,
    pub body: String,
    /// The rendering context the dispatcher received, kept for clients
    /// that deep-link (issue id, event name, actor).
    pub context: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
