//! Consolidation export handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::AdminAuth;
use crate::services::orders::OrderLogStore;
use crate::services::report;
use crate::AppState;

#[derive(Deserialize)]
pub struct ExportQuery {
    /// "csv" (default) or "workbook"
    pub format: Option<String>,
}

/// Download the consolidated order log.
///
/// `format=csv` yields the full log as a single CSV; `format=workbook`
/// yields a zip archive with a master sheet plus one sheet per branch.
pub async fn export_orders(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let store = OrderLogStore::new(&state.config.storage.orders_file);
    let records = store.read_all()?.ok_or(AppError::NoOrders)?;
    let export_date = chrono::Local::now().format("%Y-%m-%d");

    if query.format.as_deref() == Some("workbook") {
        let workbook = report::build_workbook(&records);
        let bytes = report::workbook_to_zip(&workbook)?;
        Ok((
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"consolidated_orders_{export_date}.zip\""),
                ),
            ],
            bytes,
        )
            .into_response())
    } else {
        let csv = report::records_to_csv(&records)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"consolidated_orders_{export_date}.csv\""),
                ),
            ],
            csv,
        )
            .into_response())
    }
}
