//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] is shared via `Arc<NotificationBus>` across the
//! application. Publishing is fire-and-forget: a publish with no live
//! subscribers is silently dropped, and a full buffer drops the oldest
//! unconsumed events (slow receivers observe `RecvError::Lagged`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use fieldops_core::notify::NotificationKind;
use fieldops_core::types::DbId;

// ---------------------------------------------------------------------------
// NotificationEvent
// ---------------------------------------------------------------------------

/// Rendering context for a templated notification.
///
/// Carries the already-resolved display names; the dispatcher never goes
/// back to the directory, so a failed lookup at publish time must be
/// replaced with a fallback label by the publisher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationContext {
    /// The issue this notification is about.
    pub issue_id: DbId,
    /// Issue type code (e.g. `MATERIAL_SHORTAGE`).
    pub issue_type: String,
    /// Display name of the event, when the template mentions it.
    pub event_name: Option<String>,
    /// Display name of the employee whose action triggered the
    /// notification.
    pub actor_name: String,
    /// Target status, for status-change notifications.
    pub status: Option<String>,
}

/// A notification addressed to a single employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Recipient employee id.
    pub employee_id: DbId,
    /// Which template to render.
    pub kind: NotificationKind,
    /// Template context.
    pub context: NotificationContext,
    /// When the event was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(employee_id: DbId, kind: NotificationKind, context: NotificationContext) -> Self {
        Self {
            employee_id,
            kind,
            context,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for [`NotificationEvent`]s.
pub struct NotificationBus {
    sender: broadcast::Sender<NotificationEvent>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// delivery is best-effort by contract.
    pub fn publish(&self, event: NotificationEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn context(issue_id: DbId) -> NotificationContext {
        NotificationContext {
            issue_id,
            issue_type: "EQUIPMENT".to_string(),
            event_name: Some("Pune Trade Fair".to_string()),
            actor_name: "Asha Patil".to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        bus.publish(NotificationEvent::new(
            7,
            NotificationKind::IssueRaised,
            context(42),
        ));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.employee_id, 7);
        assert_eq!(received.kind, NotificationKind::IssueRaised);
        assert_eq!(received.context.issue_id, 42);
        assert_eq!(received.context.event_name.as_deref(), Some("Pune Trade Fair"));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(NotificationEvent::new(
            9,
            NotificationKind::IssueResolved,
            context(1),
        ));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.employee_id, 9);
        assert_eq!(e2.employee_id, 9);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NotificationBus::default();
        bus.publish(NotificationEvent::new(
            1,
            NotificationKind::IssueStatusChanged,
            context(5),
        ));
    }
}
