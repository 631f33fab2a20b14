//! Route definitions for the Branch Restock Portal
//!
//! Authentication is enforced per-endpoint by the `BranchAuth` / `AdminAuth`
//! extractors rather than a route-layer middleware: every request carries
//! its static credentials.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Branch picker (public - mirrors the login dropdown)
        .route("/branches", get(handlers::list_branches))
        // Branch routes (PIN-authenticated)
        .nest("/stock", stock_routes())
        .nest("/orders", order_routes())
        // Admin routes (password-authenticated)
        .nest("/admin", admin_routes())
}

/// Stock catalog routes (branch)
fn stock_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_stock))
}

/// Order intake routes (branch)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_order))
        .route("/special", post(handlers::submit_special_request))
}

/// Admin routes: catalog upload, order consolidation, log reset
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stock", post(handlers::replace_stock))
        .route("/stock/suggest-mapping", post(handlers::suggest_stock_mapping))
        .route(
            "/orders",
            get(handlers::list_orders).delete(handlers::clear_orders),
        )
        .route("/orders/export", get(handlers::export_orders))
}
