//! HTTP handlers for order intake and the order log

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{OrderRecord, ORDER_TIME_FORMAT};

use crate::error::{AppError, AppResult};
use crate::middleware::{AdminAuth, BranchAuth};
use crate::services::orders::{self, OrderLineInput, OrderLogStore};
use crate::AppState;

#[derive(Deserialize)]
pub struct SubmitOrderInput {
    pub lines: Vec<OrderLineInput>,
}

#[derive(Serialize)]
pub struct SubmitOrderResponse {
    pub accepted: usize,
    pub order_time: String,
}

/// Submit a stock order batch for the authenticated branch.
///
/// All-or-nothing: any over-availability line rejects the whole batch with
/// the offending rows listed, and nothing is persisted.
pub async fn submit_order(
    State(state): State<AppState>,
    branch: BranchAuth,
    Json(input): Json<SubmitOrderInput>,
) -> AppResult<Json<SubmitOrderResponse>> {
    let batch = orders::validate_batch(&input.lines)?;

    let order_time = chrono::Local::now().naive_local();
    let store = OrderLogStore::new(&state.config.storage.orders_file);
    let _guard = state.write_lock.lock().await;
    let appended = store.append(&branch.branch, order_time, &batch)?;

    Ok(Json(SubmitOrderResponse {
        accepted: appended.len(),
        order_time: order_time.format(ORDER_TIME_FORMAT).to_string(),
    }))
}

#[derive(Deserialize)]
pub struct SpecialRequestInput {
    pub product_name: String,
    pub order_qty: u32,
}

/// Submit a single special request: an item not present in the catalog,
/// with no availability check.
pub async fn submit_special_request(
    State(state): State<AppState>,
    branch: BranchAuth,
    Json(input): Json<SpecialRequestInput>,
) -> AppResult<Json<SubmitOrderResponse>> {
    let line = orders::validate_special_request(&input.product_name, input.order_qty)?;

    let order_time = chrono::Local::now().naive_local();
    let store = OrderLogStore::new(&state.config.storage.orders_file);
    let _guard = state.write_lock.lock().await;
    let appended = store.append(&branch.branch, order_time, &[line])?;

    Ok(Json(SubmitOrderResponse {
        accepted: appended.len(),
        order_time: order_time.format(ORDER_TIME_FORMAT).to_string(),
    }))
}

/// Full order history in append order, for the admin dashboard.
pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> AppResult<Json<Vec<OrderRecord>>> {
    let store = OrderLogStore::new(&state.config.storage.orders_file);
    let records = store.read_all()?.ok_or(AppError::NoOrders)?;
    Ok(Json(records))
}

/// Irreversibly clear the order history. The next submission recreates the
/// log from empty.
pub async fn clear_orders(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> AppResult<Json<()>> {
    let store = OrderLogStore::new(&state.config.storage.orders_file);
    let _guard = state.write_lock.lock().await;
    store.clear()?;
    Ok(Json(()))
}
