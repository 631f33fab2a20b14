//! Domain models for the Branch Restock Portal

mod order;
mod stock;

pub use order::*;
pub use stock::*;
