//! Repository for the `events` table.
//!
//! `assigned_team` (BIGINT[]) is the denormalized team cache; the
//! reconciliation operations in the API layer keep it aligned with the
//! `assignments` relation through [`EventRepo::set_assigned_team`].

use sqlx::PgPool;

use fieldops_core::event::STATUS_ACTIVE;
use fieldops_core::types::{DbId, Timestamp};

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Column list for `events` SELECT queries.
const COLUMNS: &str = "\
    id, name, location, circle, zone, category, start_date, end_date, \
    target_sim, target_ftth, allocated_sim, allocated_ftth, key_insight, \
    assigned_team, status, assigned_to, created_by, created_at, updated_at";

/// Provides CRUD and listing operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event.
    ///
    /// `assigned_to` is the already-resolved manager id (staff-code
    /// resolution happens in the handler, before this call).
    pub async fn create(
        pool: &PgPool,
        dto: &CreateEvent,
        assigned_to: Option<DbId>,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (name, location, circle, zone, category, start_date, end_date, \
                 target_sim, target_ftth, allocated_sim, allocated_ftth, \
                 key_insight, assigned_team, assigned_to, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&dto.name)
            .bind(&dto.location)
            .bind(&dto.circle)
            .bind(&dto.zone)
            .bind(&dto.category)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .bind(dto.target_sim)
            .bind(dto.target_ftth)
            .bind(dto.allocated_sim)
            .bind(dto.allocated_ftth)
            .bind(&dto.key_insight)
            .bind(dto.assigned_team.clone().unwrap_or_default())
            .bind(assigned_to)
            .bind(dto.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an event by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY created_at DESC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// List events in a circle, newest first.
    pub async fn list_by_circle(pool: &PgPool, circle: &str) -> Result<Vec<Event>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM events WHERE circle = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Event>(&query)
            .bind(circle)
            .fetch_all(pool)
            .await
    }

    /// List events whose date window contains `now` and whose status is
    /// active.
    pub async fn list_active(pool: &PgPool, now: Timestamp) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE start_date <= $1 AND end_date >= $1 AND status = $2 \
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(now)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// List active events starting after `now`, soonest first.
    pub async fn list_upcoming(pool: &PgPool, now: Timestamp) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE start_date >= $1 AND status = $2 \
             ORDER BY start_date ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(now)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Fetch a batch of events by id, latest start date first.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Event>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("SELECT {COLUMNS} FROM events WHERE id = ANY($1) ORDER BY start_date DESC");
        sqlx::query_as::<_, Event>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Partially update an event.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET \
                name = COALESCE($2, name), \
                location = COALESCE($3, location), \
                circle = COALESCE($4, circle), \
                zone = COALESCE($5, zone), \
                category = COALESCE($6, category), \
                start_date = COALESCE($7, start_date), \
                end_date = COALESCE($8, end_date), \
                target_sim = COALESCE($9, target_sim), \
                target_ftth = COALESCE($10, target_ftth), \
                allocated_sim = COALESCE($11, allocated_sim), \
                allocated_ftth = COALESCE($12, allocated_ftth), \
                key_insight = COALESCE($13, key_insight), \
                assigned_team = COALESCE($14, assigned_team), \
                assigned_to = COALESCE($15, assigned_to), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.location)
            .bind(&dto.circle)
            .bind(&dto.zone)
            .bind(&dto.category)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .bind(dto.target_sim)
            .bind(dto.target_ftth)
            .bind(dto.allocated_sim)
            .bind(dto.allocated_ftth)
            .bind(&dto.key_insight)
            .bind(&dto.assigned_team)
            .bind(dto.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Set the event's lifecycle status.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete: mark the event deleted, leaving all related rows in
    /// place.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE events SET status = 'deleted', updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Overwrite the denormalized team list.
    ///
    /// This is one of the two writes of every reconciliation step; callers
    /// sequence it after the assignment-row write with no transaction, so
    /// the documented eventual-consistency window applies.
    pub async fn set_assigned_team(
        pool: &PgPool,
        id: DbId,
        team: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE events SET assigned_team = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(team)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
