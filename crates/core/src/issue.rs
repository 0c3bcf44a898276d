//! Issue lifecycle states, issue types, and the append-only timeline.
//!
//! There is no enforced transition table: any status may be set from any
//! other, and the side effects (resolution stamps, notifications) key off
//! the target status alone. See [`crate::notify`] for the notification
//! rules.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "OPEN";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_RESOLVED: &str = "RESOLVED";
pub const STATUS_CLOSED: &str = "CLOSED";

/// All valid issue statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

/// Whether a status counts as terminal for resolution stamping.
///
/// Transitions into either of these set `resolved_by`/`resolved_at`.
pub fn is_resolution(status: &str) -> bool {
    status == STATUS_RESOLVED || status == STATUS_CLOSED
}

/// Validate an issue status value.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid issue status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Issue types
// ---------------------------------------------------------------------------

pub const TYPE_MATERIAL_SHORTAGE: &str = "MATERIAL_SHORTAGE";
pub const TYPE_SITE_ACCESS: &str = "SITE_ACCESS";
pub const TYPE_EQUIPMENT: &str = "EQUIPMENT";
pub const TYPE_NETWORK_PROBLEM: &str = "NETWORK_PROBLEM";
pub const TYPE_OTHER: &str = "OTHER";

/// All valid issue types.
pub const VALID_TYPES: &[&str] = &[
    TYPE_MATERIAL_SHORTAGE,
    TYPE_SITE_ACCESS,
    TYPE_EQUIPMENT,
    TYPE_NETWORK_PROBLEM,
    TYPE_OTHER,
];

/// Validate an issue type value.
pub fn validate_type(issue_type: &str) -> Result<(), String> {
    if VALID_TYPES.contains(&issue_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid issue type '{issue_type}'. Must be one of: {}",
            VALID_TYPES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// One entry in an issue's embedded timeline.
///
/// The timeline is append-only: past entries are never mutated, updates
/// always write the previous list plus exactly one new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub action: String,
    pub performed_by: DbId,
    pub timestamp: Timestamp,
}

impl TimelineEntry {
    pub fn new(action: impl Into<String>, performed_by: DbId, timestamp: Timestamp) -> Self {
        Self {
            action: action.into(),
            performed_by,
            timestamp,
        }
    }
}

/// The single entry every new issue's timeline is seeded with.
pub fn creation_entry(raised_by: DbId, now: Timestamp) -> TimelineEntry {
    TimelineEntry::new("Issue Created", raised_by, now)
}

/// Timeline action text for a status change, with optional remarks.
pub fn status_change_action(status: &str, remarks: Option<&str>) -> String {
    match remarks {
        Some(r) if !r.is_empty() => format!("Status changed to {status}: {r}"),
        _ => format!("Status changed to {status}"),
    }
}

/// Timeline action text for an escalation.
///
/// The escalated-to employee is recorded by id; the timeline never depends
/// on directory lookups succeeding.
pub fn escalation_action(escalated_to: DbId) -> String {
    format!("Escalated to {escalated_to}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_valid() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(validate_status("REOPENED").is_err());
        assert!(validate_status("open").is_err());
    }

    #[test]
    fn test_resolution_statuses() {
        assert!(is_resolution(STATUS_RESOLVED));
        assert!(is_resolution(STATUS_CLOSED));
        assert!(!is_resolution(STATUS_OPEN));
        assert!(!is_resolution(STATUS_IN_PROGRESS));
    }

    #[test]
    fn test_all_types_valid() {
        for t in VALID_TYPES {
            assert!(validate_type(t).is_ok());
        }
        assert_eq!(VALID_TYPES.len(), 5);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = validate_type("WEATHER");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid issue type"));
    }

    #[test]
    fn test_creation_entry_text() {
        let now = chrono::Utc::now();
        let entry = creation_entry(7, now);
        assert_eq!(entry.action, "Issue Created");
        assert_eq!(entry.performed_by, 7);
        assert_eq!(entry.timestamp, now);
    }

    #[test]
    fn test_status_change_action_with_remarks() {
        assert_eq!(
            status_change_action(STATUS_RESOLVED, Some("restocked at noon")),
            "Status changed to RESOLVED: restocked at noon"
        );
    }

    #[test]
    fn test_status_change_action_without_remarks() {
        assert_eq!(
            status_change_action(STATUS_IN_PROGRESS, None),
            "Status changed to IN_PROGRESS"
        );
        // Empty remarks behave like no remarks.
        assert_eq!(
            status_change_action(STATUS_IN_PROGRESS, Some("")),
            "Status changed to IN_PROGRESS"
        );
    }

    #[test]
    fn test_escalation_action_uses_id() {
        assert_eq!(escalation_action(42), "Escalated to 42");
    }
}
