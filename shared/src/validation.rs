//! Validation utilities for the Branch Restock Portal

use rust_decimal::Decimal;

// ============================================================================
// Order Validations
// ============================================================================

/// A stock order line is over-limit when it asks for more than the catalog
/// snapshot has on hand. Equality is allowed.
pub fn exceeds_available(order_qty: u32, available_qty: Decimal) -> bool {
    Decimal::from(order_qty) > available_qty
}

/// Validate a special request line (free-text item, no availability check).
pub fn validate_special_request(product_name: &str, order_qty: u32) -> Result<(), &'static str> {
    if product_name.trim().is_empty() {
        return Err("Product name must not be empty");
    }
    if order_qty == 0 {
        return Err("Order quantity must be positive");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a branch name (non-empty after trimming).
pub fn validate_branch_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Branch name must not be empty");
    }
    Ok(())
}

/// Static credential comparison for branch PINs and the admin password.
/// Exact string equality; this is a low-threat deployment, constant-time
/// comparison is deliberately not used.
pub fn credentials_match(supplied: &str, expected: &str) -> bool {
    supplied == expected
}
