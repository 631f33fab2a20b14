//! Common types used across the portal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Explicit mapping from uploaded column positions to the canonical stock
/// schema. Produced once by the schema normalizer (seeded by the keyword
/// heuristic, overridable by the admin) so downstream code never guesses
/// column identity again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Index of the product name column in the uploaded header row
    pub name_col: usize,
    /// Index of the expiry date column
    pub expiry_col: usize,
    /// Index of the quantity-on-hand column
    pub qty_col: usize,
}

/// One order line turned away by batch validation, with the quantities that
/// caused the rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedLine {
    pub product_name: String,
    pub requested_qty: u32,
    pub available_qty: Decimal,
}
