//! Stock catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column headers of the persisted stock catalog, in order.
pub const CATALOG_HEADERS: [&str; 4] = ["Product Name", "Expiry", "Available Qty", "Order Qty"];

/// One row of the stock catalog.
///
/// `available_qty` is authoritative (snapshot of the last admin upload).
/// `order_qty` is a per-session transient the branch fills in before
/// submitting; the persisted catalog always carries it as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_name: String,
    /// Free-form expiry label (may be "New Request" for special lines)
    pub expiry: String,
    pub available_qty: Decimal,
    #[serde(default)]
    pub order_qty: u32,
}

impl StockItem {
    pub fn new(product_name: impl Into<String>, expiry: impl Into<String>, available_qty: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            expiry: expiry.into(),
            available_qty,
            order_qty: 0,
        }
    }

    /// Case-insensitive match of `term` against any column of the row.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.product_name.to_lowercase().contains(&term)
            || self.expiry.to_lowercase().contains(&term)
            || self.available_qty.to_string().contains(&term)
    }
}
