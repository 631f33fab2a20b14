//! Shared types and models for the Branch Restock Portal
//!
//! This crate contains the domain types shared between the backend and any
//! other components of the system (exporters, future frontends).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
