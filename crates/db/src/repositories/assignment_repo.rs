//! Repository for the `assignments` table.
//!
//! One row per (event, employee), enforced by
//! `uq_assignments_event_employee`. The running `sim_sold`/`ftth_sold`
//! counters are written with absolute values computed by the caller from a
//! previously read snapshot -- there is deliberately no atomic increment
//! here (see the sales submission path).

use sqlx::PgPool;

use fieldops_core::types::DbId;

use crate::models::assignment::Assignment;

/// Column list for `assignments` SELECT queries.
const COLUMNS: &str = "\
    id, event_id, employee_id, sim_target, ftth_target, sim_sold, \
    ftth_sold, assigned_by, created_at, updated_at";

/// Provides CRUD operations for team-member assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment with explicit targets.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
        sim_target: i32,
        ftth_target: i32,
        assigned_by: DbId,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (event_id, employee_id, sim_target, ftth_target, assigned_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(event_id)
            .bind(employee_id)
            .bind(sim_target)
            .bind(ftth_target)
            .bind(assigned_by)
            .fetch_one(pool)
            .await
    }

    /// Insert an assignment with zero targets, ignoring duplicates.
    ///
    /// Used by the bulk team-assignment path, which must be idempotent per
    /// employee.
    pub async fn insert_ignore(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
        assigned_by: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO assignments (event_id, employee_id, assigned_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (event_id, employee_id) DO NOTHING",
        )
        .bind(event_id)
        .bind(employee_id)
        .bind(assigned_by)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the assignment for an (event, employee) pair.
    pub async fn find_by_event_and_employee(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assignments WHERE event_id = $1 AND employee_id = $2");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(event_id)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// List all assignments for an event.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assignments WHERE event_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// List all assignments held by an employee.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assignments WHERE employee_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Update a member's targets in place.
    ///
    /// Returns `None` when no assignment exists for the pair; callers that
    /// preserve the silent-no-op contract simply pass that through.
    pub async fn update_targets(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
        sim_target: i32,
        ftth_target: i32,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments \
             SET sim_target = $3, ftth_target = $4, updated_at = NOW() \
             WHERE event_id = $1 AND employee_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(event_id)
            .bind(employee_id)
            .bind(sim_target)
            .bind(ftth_target)
            .fetch_optional(pool)
            .await
    }

    /// Write absolute values for the running sold counters.
    ///
    /// The caller computes `snapshot + submitted`; concurrent submissions
    /// against the same snapshot can lose an increment (last writer wins),
    /// which matches the documented aggregation contract.
    pub async fn update_sold(
        pool: &PgPool,
        id: DbId,
        sim_sold: i32,
        ftth_sold: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE assignments SET sim_sold = $2, ftth_sold = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(sim_sold)
        .bind(ftth_sold)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the assignment for an (event, employee) pair.
    ///
    /// Returns the number of rows removed (0 when none existed).
    pub async fn delete(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignments WHERE event_id = $1 AND employee_id = $2")
            .bind(event_id)
            .bind(employee_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
