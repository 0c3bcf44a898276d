//! Sales entry entity models and DTOs.
//!
//! Sales entries are immutable facts -- no update DTO, no `updated_at`.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use fieldops_core::types::{DbId, Timestamp};

/// A photo captured with a sales submission. Coordinates are kept as the
/// strings the device reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPhoto {
    pub uri: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub timestamp: String,
}

/// One sales submission against an event by an employee.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalesEntry {
    pub id: DbId,
    pub event_id: DbId,
    pub employee_id: DbId,
    pub sims_sold: i32,
    pub sims_activated: i32,
    pub ftth_sold: i32,
    pub ftth_activated: i32,
    pub customer_type: String,
    pub photos: Json<Vec<SalesPhoto>>,
    pub gps_latitude: Option<String>,
    pub gps_longitude: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting sales.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSalesEntry {
    pub employee_id: DbId,
    #[validate(range(min = 0))]
    pub sims_sold: i32,
    #[validate(range(min = 0))]
    pub sims_activated: i32,
    #[validate(range(min = 0))]
    pub ftth_sold: i32,
    #[validate(range(min = 0))]
    pub ftth_activated: i32,
    pub customer_type: String,
    pub photos: Option<Vec<SalesPhoto>>,
    pub gps_latitude: Option<String>,
    pub gps_longitude: Option<String>,
    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}
