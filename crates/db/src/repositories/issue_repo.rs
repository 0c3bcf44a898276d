//! Repository for the `issues` table.
//!
//! The timeline column always receives the full previous list plus one
//! appended entry, serialized as JSONB; entries are never edited in place.

use sqlx::types::Json;
use sqlx::PgPool;

use fieldops_core::issue::{TimelineEntry, STATUS_IN_PROGRESS, STATUS_OPEN};
use fieldops_core::types::{DbId, Timestamp};

use crate::models::issue::{CreateIssue, Issue, IssueQuery};

/// Column list for `issues` SELECT queries.
const COLUMNS: &str = "\
    id, event_id, raised_by, issue_type, description, status, escalated_to, \
    timeline, resolved_by, resolved_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new issue in the OPEN state with a pre-seeded timeline.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateIssue,
        timeline: Vec<TimelineEntry>,
    ) -> Result<Issue, sqlx::Error> {
        let query = format!(
            "INSERT INTO issues (event_id, raised_by, issue_type, description, status, escalated_to, timeline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(dto.event_id)
            .bind(dto.raised_by)
            .bind(&dto.issue_type)
            .bind(&dto.description)
            .bind(STATUS_OPEN)
            .bind(dto.escalated_to)
            .bind(Json(timeline))
            .fetch_one(pool)
            .await
    }

    /// Find an issue by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = $1");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List issues matching the given filters, newest first.
    pub async fn list(pool: &PgPool, params: &IssueQuery) -> Result<Vec<Issue>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if params.event_id.is_some() {
            conditions.push(format!("event_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.raised_by.is_some() {
            conditions.push(format!("raised_by = ${bind_idx}"));
            let _ = bind_idx;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("SELECT {COLUMNS} FROM issues {where_clause} ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, Issue>(&query);
        if let Some(event_id) = params.event_id {
            q = q.bind(event_id);
        }
        if let Some(ref status) = params.status {
            q = q.bind(status.clone());
        }
        if let Some(raised_by) = params.raised_by {
            q = q.bind(raised_by);
        }
        q.fetch_all(pool).await
    }

    /// Write a status change together with its appended timeline and the
    /// optional resolution stamp.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        timeline: Vec<TimelineEntry>,
        resolved_by: Option<DbId>,
        resolved_at: Option<Timestamp>,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET \
                status = $2, \
                timeline = $3, \
                resolved_by = COALESCE($4, resolved_by), \
                resolved_at = COALESCE($5, resolved_at), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(status)
            .bind(Json(timeline))
            .bind(resolved_by)
            .bind(resolved_at)
            .fetch_optional(pool)
            .await
    }

    /// Redirect the issue to a new escalated-to employee.
    ///
    /// Forces the status to IN_PROGRESS regardless of its prior value.
    pub async fn escalate(
        pool: &PgPool,
        id: DbId,
        escalated_to: DbId,
        timeline: Vec<TimelineEntry>,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET \
                escalated_to = $2, \
                status = $3, \
                timeline = $4, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(escalated_to)
            .bind(STATUS_IN_PROGRESS)
            .bind(Json(timeline))
            .fetch_optional(pool)
            .await
    }

    /// Count issues currently in the OPEN state.
    pub async fn count_open(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issues WHERE status = $1")
            .bind(STATUS_OPEN)
            .fetch_one(pool)
            .await
    }
}
