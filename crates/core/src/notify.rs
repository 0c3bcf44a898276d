//! Notification decision table for the issue lifecycle.
//!
//! Who gets told what, for each kind of issue transition, as a pure
//! function of the identities involved. Keeping this separate from storage
//! and delivery makes the overlap rules (updater vs. raiser vs.
//! escalated-to) auditable in one place.
//!
//! The rules:
//! - **create**: the escalated-to employee, when one was named, is told the
//!   issue was raised. Nobody else.
//! - **status change into RESOLVED/CLOSED**: the raiser is told, unless the
//!   raiser made the change themself.
//! - **any other status change**: the raiser is told (unless they made the
//!   change), and the escalated-to employee is told independently when one
//!   exists and is neither the updater nor the raiser.
//! - **escalate**: the newly escalated employee is told the issue was
//!   raised (same template as create).

use serde::{Deserialize, Serialize};

use crate::issue::is_resolution;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Templated notification kinds the dispatcher knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    IssueRaised,
    IssueResolved,
    IssueStatusChanged,
}

impl NotificationKind {
    /// Stable string form stored on notification rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::IssueRaised => "ISSUE_RAISED",
            NotificationKind::IssueResolved => "ISSUE_RESOLVED",
            NotificationKind::IssueStatusChanged => "ISSUE_STATUS_CHANGED",
        }
    }
}

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// The identities attached to an issue that the rules consult.
#[derive(Debug, Clone, Copy)]
pub struct IssueParties {
    pub raised_by: DbId,
    pub escalated_to: Option<DbId>,
}

/// Recipients for a freshly created issue.
pub fn on_create(escalated_to: Option<DbId>) -> Vec<(DbId, NotificationKind)> {
    match escalated_to {
        Some(id) => vec![(id, NotificationKind::IssueRaised)],
        None => Vec::new(),
    }
}

/// Recipients for a status change to `new_status` performed by `updated_by`.
///
/// `parties` reflects the issue *before* the update (the escalated-to
/// employee notified here is whoever held the escalation at update time).
pub fn on_status_change(
    new_status: &str,
    parties: IssueParties,
    updated_by: DbId,
) -> Vec<(DbId, NotificationKind)> {
    let mut recipients = Vec::new();

    if is_resolution(new_status) {
        if parties.raised_by != updated_by {
            recipients.push((parties.raised_by, NotificationKind::IssueResolved));
        }
        return recipients;
    }

    if parties.raised_by != updated_by {
        recipients.push((parties.raised_by, NotificationKind::IssueStatusChanged));
    }
    if let Some(escalated_to) = parties.escalated_to {
        if escalated_to != updated_by && escalated_to != parties.raised_by {
            recipients.push((escalated_to, NotificationKind::IssueStatusChanged));
        }
    }

    recipients
}

/// Recipients for an escalation: always exactly the new escalated-to
/// employee, told via the raised template.
pub fn on_escalate(escalated_to: DbId) -> Vec<(DbId, NotificationKind)> {
    vec![(escalated_to, NotificationKind::IssueRaised)]
}
