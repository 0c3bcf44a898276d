//! Customer type constants for sales entries.

pub const CUSTOMER_B2C: &str = "B2C";
pub const CUSTOMER_B2B: &str = "B2B";
pub const CUSTOMER_GOVERNMENT: &str = "Government";
pub const CUSTOMER_ENTERPRISE: &str = "Enterprise";

/// All valid customer types.
pub const VALID_CUSTOMER_TYPES: &[&str] = &[
    CUSTOMER_B2C,
    CUSTOMER_B2B,
    CUSTOMER_GOVERNMENT,
    CUSTOMER_ENTERPRISE,
];

/// Validate a customer type value.
pub fn validate_customer_type(customer_type: &str) -> Result<(), String> {
    if VALID_CUSTOMER_TYPES.contains(&customer_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid customer type '{customer_type}'. Must be one of: {}",
            VALID_CUSTOMER_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_customer_types_valid() {
        for t in VALID_CUSTOMER_TYPES {
            assert!(validate_customer_type(t).is_ok());
        }
        assert_eq!(VALID_CUSTOMER_TYPES.len(), 4);
    }

    #[test]
    fn test_unknown_customer_type_rejected() {
        let result = validate_customer_type("Retail");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid customer type"));
    }
}
