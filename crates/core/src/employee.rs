//! Employee role constants.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_ZONE_MANAGER: &str = "ZONE_MANAGER";
pub const ROLE_EVENT_MANAGER: &str = "EVENT_MANAGER";
pub const ROLE_SALES_STAFF: &str = "SALES_STAFF";

/// All valid employee roles.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_ZONE_MANAGER,
    ROLE_EVENT_MANAGER,
    ROLE_SALES_STAFF,
];

/// Validate an employee role value.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_valid() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(validate_role("SUPERVISOR").is_err());
    }
}
