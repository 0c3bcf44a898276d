use std::sync::Arc;

use fieldops_events::NotificationBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fieldops_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Notification bus; handlers publish after their storage writes.
    pub notifier: Arc<NotificationBus>,
}
