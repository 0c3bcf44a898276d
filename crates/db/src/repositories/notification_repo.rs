//! Repository for the `notifications` table.

use sqlx::PgPool;

use fieldops_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, employee_id, kind, title, body, context, is_read, read_at, created_at";

/// Provides CRUD operations for in-app notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for an employee, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        employee_id: DbId,
        kind: &str,
        title: &str,
        body: &str,
        context: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (employee_id, kind, title, body, context) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(employee_id)
        .bind(kind)
        .bind(title)
        .bind(body)
        .bind(context)
        .fetch_one(pool)
        .await
    }

    /// List notifications for an employee, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with
    /// `is_read = false` are returned.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE employee_id = $1 {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(employee_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given employee
    /// and updated, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        employee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND employee_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(employee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for an employee.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, employee_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE employee_id = $1 AND is_read = false",
        )
        .bind(employee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for an employee.
    pub async fn unread_count(pool: &PgPool, employee_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE employee_id = $1 AND is_read = false",
        )
        .bind(employee_id)
        .fetch_one(pool)
        .await
    }
}
