//! Repository for the `sales_entries` table.
//!
//! Entries are immutable facts: insert and list only.

use sqlx::types::Json;
use sqlx::PgPool;

use fieldops_core::types::DbId;

use crate::models::sales::{CreateSalesEntry, SalesEntry};

/// Column list for `sales_entries` SELECT queries.
const COLUMNS: &str = "\
    id, event_id, employee_id, sims_sold, sims_activated, ftth_sold, \
    ftth_activated, customer_type, photos, gps_latitude, gps_longitude, \
    remarks, created_at";

/// Provides insert and listing operations for sales entries.
pub struct SalesEntryRepo;

impl SalesEntryRepo {
    /// Record a sales submission.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        dto: &CreateSalesEntry,
    ) -> Result<SalesEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO sales_entries \
                (event_id, employee_id, sims_sold, sims_activated, ftth_sold, \
                 ftth_activated, customer_type, photos, gps_latitude, gps_longitude, remarks) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalesEntry>(&query)
            .bind(event_id)
            .bind(dto.employee_id)
            .bind(dto.sims_sold)
            .bind(dto.sims_activated)
            .bind(dto.ftth_sold)
            .bind(dto.ftth_activated)
            .bind(&dto.customer_type)
            .bind(Json(dto.photos.clone().unwrap_or_default()))
            .bind(&dto.gps_latitude)
            .bind(&dto.gps_longitude)
            .bind(&dto.remarks)
            .fetch_one(pool)
            .await
    }

    /// List all entries for an event, newest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<SalesEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sales_entries WHERE event_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SalesEntry>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// List an employee's entries for an event, newest first.
    pub async fn list_for_event_and_employee(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
    ) -> Result<Vec<SalesEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sales_entries \
             WHERE event_id = $1 AND employee_id = $2 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SalesEntry>(&query)
            .bind(event_id)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
