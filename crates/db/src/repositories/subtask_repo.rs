//! Repository for the `subtasks` table.

use sqlx::PgPool;

use fieldops_core::subtask::STATUS_COMPLETED;
use fieldops_core::types::DbId;

use crate::models::subtask::{CreateSubtask, Subtask, UpdateSubtask};

/// Column list for `subtasks` SELECT queries.
const COLUMNS: &str = "\
    id, event_id, title, description, assigned_to, priority, status, \
    due_date, completed_at, completed_by, created_by, created_at, updated_at";

/// Provides CRUD operations for event subtasks.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Insert a new subtask.
    ///
    /// `assigned_to` is the already-resolved assignee id; the implicit
    /// assignment side effect happens in the handler before this call.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        dto: &CreateSubtask,
        assigned_to: Option<DbId>,
    ) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtasks (event_id, title, description, assigned_to, priority, due_date, created_by) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'medium'), $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(event_id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(assigned_to)
            .bind(&dto.priority)
            .bind(dto.due_date)
            .bind(dto.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a subtask by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subtask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subtasks WHERE id = $1");
        sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all subtasks for an event, newest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Subtask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM subtasks WHERE event_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Subtask>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update a subtask.
    ///
    /// A patch that moves the status to `completed` also stamps
    /// `completed_at`/`completed_by` with the updater.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateSubtask,
    ) -> Result<Option<Subtask>, sqlx::Error> {
        let completing = dto.status.as_deref() == Some(STATUS_COMPLETED);
        let completion_sets = if completing {
            ", completed_at = NOW(), completed_by = $8"
        } else {
            ""
        };

        let query = format!(
            "UPDATE subtasks SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                assigned_to = COALESCE($4, assigned_to), \
                status = COALESCE($5, status), \
                priority = COALESCE($6, priority), \
                due_date = COALESCE($7, due_date), \
                updated_at = NOW()\
                {completion_sets} \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );

        let mut q = sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.assigned_to)
            .bind(&dto.status)
            .bind(&dto.priority)
            .bind(dto.due_date);
        if completing {
            q = q.bind(dto.updated_by);
        }
        q.fetch_optional(pool).await
    }

    /// Delete a subtask. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
