//! Background task that turns published [`NotificationEvent`]s into stored
//! in-app notifications.
//!
//! Delivery is best-effort: a failed write is logged and dropped, never
//! surfaced to the operation that published the event.

use sqlx::PgPool;
use tokio::sync::broadcast;

use fieldops_core::notify::NotificationKind;
use fieldops_db::repositories::NotificationRepo;

use crate::bus::{NotificationContext, NotificationEvent};

/// Consumes the notification bus and records in-app notifications.
pub struct NotificationDispatcher {
    pool: PgPool,
}

impl NotificationDispatcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the dispatch loop.
    ///
    /// Exits when the channel is closed (i.e. the
    /// [`NotificationBus`](crate::NotificationBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<NotificationEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.deliver(&event).await {
                        tracing::error!(
                            error = %e,
                            employee_id = event.employee_id,
                            kind = event.kind.as_str(),
                            "Failed to deliver notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Notification bus closed, dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Render and persist a single notification.
    async fn deliver(&self, event: &NotificationEvent) -> Result<(), sqlx::Error> {
        let title = render_title(event.kind);
        let body = render_body(event.kind, &event.context);
        let context = serde_json::to_value(&event.context).unwrap_or_default();

        NotificationRepo::create(
            &self.pool,
            event.employee_id,
            event.kind.as_str(),
            title,
            &body,
            &context,
        )
        .await?;

        tracing::debug!(
            employee_id = event.employee_id,
            kind = event.kind.as_str(),
            issue_id = event.context.issue_id,
            "Notification delivered"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Template rendering
// ---------------------------------------------------------------------------

/// Title line for a notification kind.
pub fn render_title(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::IssueRaised => "New Issue Reported",
        NotificationKind::IssueResolved => "Issue Resolved",
        NotificationKind::IssueStatusChanged => "Issue Status Updated",
    }
}

/// Body text for a notification kind and context.
pub fn render_body(kind: NotificationKind, context: &NotificationContext) -> String {
    match kind {
        NotificationKind::IssueRaised => format!(
            "{} issue reported at {} by {}",
            context.issue_type,
            context.event_name.as_deref().unwrap_or("Unknown Event"),
            context.actor_name,
        ),
        NotificationKind::IssueResolved => format!(
            "Your {} issue was resolved by {}",
            context.issue_type, context.actor_name,
        ),
        NotificationKind::IssueStatusChanged => format!(
            "Your {} issue was moved to {} by {}",
            context.issue_type,
            context.status.as_deref().unwrap_or("UPDATED"),
            context.actor_name,
        ),
    }
}
