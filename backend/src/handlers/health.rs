//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::CatalogStore;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_status = match CatalogStore::new(&state.config.storage.stock_file).load() {
        Ok(Some(_)) => "ready".to_string(),
        Ok(None) => "awaiting first upload".to_string(),
        Err(_) => "unreadable".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: catalog_status,
    })
}
