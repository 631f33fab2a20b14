//! HTTP handlers for the stock catalog: branch read access and admin uploads

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{ColumnMapping, StockItem};

use crate::error::{AppError, AppResult};
use crate::middleware::{AdminAuth, BranchAuth};
use crate::services::catalog::{filter_catalog, CatalogStore};
use crate::services::schema;
use crate::AppState;

#[derive(Deserialize)]
pub struct StockQuery {
    /// Optional search term matched against every catalog column
    pub search: Option<String>,
}

/// List the configured branch names (for the client's branch picker).
pub async fn list_branches(State(state): State<AppState>) -> Json<Vec<String>> {
    let mut branches: Vec<String> = state.config.branches.keys().cloned().collect();
    branches.sort();
    Json(branches)
}

/// Current stock catalog for an authenticated branch.
pub async fn get_stock(
    State(state): State<AppState>,
    _branch: BranchAuth,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<Vec<StockItem>>> {
    let store = CatalogStore::new(&state.config.storage.stock_file);
    let items = store.load()?.ok_or(AppError::CatalogUnavailable)?;
    let items = match query.search.as_deref() {
        Some(term) => filter_catalog(items, term),
        None => items,
    };
    Ok(Json(items))
}

/// Preview of an uploaded stock file before the catalog is replaced.
#[derive(Serialize)]
pub struct UploadPreview {
    pub headers: Vec<String>,
    pub suggested: ColumnMapping,
    pub row_count: usize,
}

/// Parse an uploaded stock file and return its headers with the heuristic
/// default column mapping, without touching the persisted catalog.
pub async fn suggest_stock_mapping(
    State(_state): State<AppState>,
    _admin: AdminAuth,
    multipart: Multipart,
) -> AppResult<Json<UploadPreview>> {
    let upload = read_upload(multipart).await?;
    let parsed = schema::parse_upload(&upload.file_name, &upload.bytes)?;
    let suggested = schema::suggest_mapping(&parsed.headers);
    Ok(Json(UploadPreview {
        row_count: parsed.rows.len(),
        headers: parsed.headers,
        suggested,
    }))
}

#[derive(Serialize)]
pub struct ReplaceStockResponse {
    pub updated: usize,
}

/// Normalize an uploaded stock file and replace the persisted catalog.
///
/// Mapping fields (`name_col`, `expiry_col`, `qty_col`) are taken verbatim
/// when supplied; fields left out fall back to the keyword heuristic. A
/// parse failure leaves the previous catalog in place.
pub async fn replace_stock(
    State(state): State<AppState>,
    _admin: AdminAuth,
    multipart: Multipart,
) -> AppResult<Json<ReplaceStockResponse>> {
    let upload = read_upload(multipart).await?;
    let parsed = schema::parse_upload(&upload.file_name, &upload.bytes)?;
    let suggested = schema::suggest_mapping(&parsed.headers);
    let mapping = ColumnMapping {
        name_col: upload.name_col.unwrap_or(suggested.name_col),
        expiry_col: upload.expiry_col.unwrap_or(suggested.expiry_col),
        qty_col: upload.qty_col.unwrap_or(suggested.qty_col),
    };
    let items = schema::normalize(&parsed, &mapping)?;

    let store = CatalogStore::new(&state.config.storage.stock_file);
    let _guard = state.write_lock.lock().await;
    store.replace(&items)?;

    Ok(Json(ReplaceStockResponse {
        updated: items.len(),
    }))
}

/// Fields of a stock upload request.
struct StockUpload {
    file_name: String,
    bytes: Vec<u8>,
    name_col: Option<usize>,
    expiry_col: Option<usize>,
    qty_col: Option<usize>,
}

async fn read_upload(mut multipart: Multipart) -> AppResult<StockUpload> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut name_col = None;
    let mut expiry_col = None;
    let mut qty_col = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadParse(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::UploadParse(e.to_string()))?;
                file = Some((file_name, bytes.to_vec()));
            }
            "name_col" => name_col = Some(column_index(field, "name_col").await?),
            "expiry_col" => expiry_col = Some(column_index(field, "expiry_col").await?),
            "qty_col" => qty_col = Some(column_index(field, "qty_col").await?),
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::UploadParse("missing \"file\" field".to_string()))?;
    Ok(StockUpload {
        file_name,
        bytes,
        name_col,
        expiry_col,
        qty_col,
    })
}

async fn column_index(field: axum::extract::multipart::Field<'_>, label: &str) -> AppResult<usize> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::UploadParse(e.to_string()))?;
    text.trim()
        .parse()
        .map_err(|e| AppError::UploadParse(format!("invalid {label} value {:?}: {e}", text)))
}
