//! Notification infrastructure for the fieldops platform.
//!
//! - [`NotificationBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. Handlers publish after their storage writes
//!   complete; publishing never fails the operation.
//! - [`NotificationEvent`] — the envelope carrying recipient, kind, and
//!   rendering context.
//! - [`NotificationDispatcher`] — background task that consumes the bus and
//!   records in-app notifications, swallowing (and logging) delivery
//!   failures.

pub mod bus;
pub mod dispatcher;

pub use bus::{NotificationBus, NotificationContext, NotificationEvent};
pub use dispatcher::NotificationDispatcher;
