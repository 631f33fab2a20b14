//! HTTP handlers for the Branch Restock Portal

pub mod health;
pub mod orders;
pub mod report;
pub mod stock;

pub use health::*;
pub use orders::*;
pub use report::*;
pub use stock::*;
