//! Business logic services for the Branch Restock Portal

pub mod catalog;
pub mod orders;
pub mod report;
pub mod schema;

pub use catalog::CatalogStore;
pub use orders::OrderLogStore;
