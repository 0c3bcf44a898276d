//! Event status, category, and circle constant tables.
//!
//! Events move through a simple lifecycle set by the UI; the backend does
//! not enforce a transition table, it only rejects values outside the
//! accepted set. `deleted` is reached exclusively through the soft-delete
//! operation, never through a status update.

/// Event exists but is not yet visible to field staff.
pub const STATUS_DRAFT: &str = "draft";

/// Event is live; sales submissions and issues are expected.
pub const STATUS_ACTIVE: &str = "active";

/// Event is temporarily on hold.
pub const STATUS_PAUSED: &str = "paused";

/// Event finished normally.
pub const STATUS_COMPLETED: &str = "completed";

/// Event was called off before completion.
pub const STATUS_CANCELLED: &str = "cancelled";

/// Soft-deleted; hidden from all listings.
pub const STATUS_DELETED: &str = "deleted";

/// Statuses a caller may set through the status-update operation.
pub const SETTABLE_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_ACTIVE,
    STATUS_PAUSED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Accepted event categories.
pub const VALID_CATEGORIES: &[&str] = &[
    "Cultural",
    "Religious",
    "Sports",
    "Exhibition",
    "Fair",
    "Festival",
    "Agri-Tourism",
    "Eco-Tourism",
    "Trade/Religious",
];

/// Accepted telecom circles. Also the valid values for an employee's
/// `circle` field.
pub const VALID_CIRCLES: &[&str] = &[
    "ANDAMAN_NICOBAR",
    "ANDHRA_PRADESH",
    "ASSAM",
    "BIHAR",
    "CHHATTISGARH",
    "GUJARAT",
    "HARYANA",
    "HIMACHAL_PRADESH",
    "JAMMU_KASHMIR",
    "JHARKHAND",
    "KARNATAKA",
    "KERALA",
    "MADHYA_PRADESH",
    "MAHARASHTRA",
    "NORTH_EAST_I",
    "NORTH_EAST_II",
    "ODISHA",
    "PUNJAB",
    "RAJASTHAN",
    "TAMIL_NADU",
    "TELANGANA",
    "UTTARAKHAND",
    "UTTAR_PRADESH_EAST",
    "UTTAR_PRADESH_WEST",
    "WEST_BENGAL",
];

/// Validate a status value supplied to the status-update operation.
pub fn validate_settable_status(status: &str) -> Result<(), String> {
    if SETTABLE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            SETTABLE_STATUSES.join(", ")
        ))
    }
}

/// Validate an event category.
pub fn validate_category(category: &str) -> Result<(), String> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(format!("Invalid category '{category}'"))
    }
}

/// Validate a circle code.
pub fn validate_circle(circle: &str) -> Result<(), String> {
    if VALID_CIRCLES.contains(&circle) {
        Ok(())
    } else {
        Err(format!("Invalid circle '{circle}'"))
    }
}
