//! Schema normalizer for admin stock uploads
//!
//! Maps an arbitrary uploaded table with unknown column names onto the
//! canonical four-column stock schema. Column selection is seeded by a
//! keyword heuristic but the admin's explicit mapping always wins.

use rust_decimal::Decimal;
use shared::{ColumnMapping, StockItem};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Keywords suggesting the product name column.
pub const NAME_KEYWORDS: [&str; 4] = ["name", "desc", "item", "prod"];

/// Keywords suggesting the expiry date column.
pub const EXPIRY_KEYWORDS: [&str; 3] = ["exp", "date", "validity"];

/// Keywords suggesting the quantity-on-hand column.
pub const QTY_KEYWORDS: [&str; 4] = ["qty", "stk", "bal", "hand"];

/// An uploaded table parsed into a header row and data rows, before any
/// column mapping has been applied.
#[derive(Debug, Clone)]
pub struct ParsedUpload {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse an uploaded delimited file into headers and rows.
///
/// Spreadsheet formats (.xls/.xlsx) are an external codec concern; the
/// portal accepts the delimited exports every POS can produce. Any parse
/// failure leaves the persisted catalog untouched.
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> AppResult<ParsedUpload> {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let delimiter = match extension.as_str() {
        "csv" => b',',
        "tsv" | "txt" => b'\t',
        other => {
            return Err(AppError::UploadParse(format!(
                "unsupported file extension \".{other}\"; upload a .csv or .tsv export"
            )))
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::UploadParse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(AppError::UploadParse(
            "uploaded file has no column headers".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::UploadParse(e.to_string()))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(ParsedUpload { headers, rows })
}

/// Suggest a default column mapping by scanning header names for known
/// keywords, case-insensitively. The first matching column wins; a field
/// with no match defaults to the first column. This only seeds the admin's
/// selection and is never applied against an explicit mapping.
pub fn suggest_mapping(headers: &[String]) -> ColumnMapping {
    ColumnMapping {
        name_col: keyword_index(headers, &NAME_KEYWORDS),
        expiry_col: keyword_index(headers, &EXPIRY_KEYWORDS),
        qty_col: keyword_index(headers, &QTY_KEYWORDS),
    }
}

fn keyword_index(headers: &[String], keywords: &[&str]) -> usize {
    headers
        .iter()
        .position(|header| {
            let header = header.to_lowercase();
            keywords.iter().any(|k| header.contains(k))
        })
        .unwrap_or(0)
}

/// Apply a column mapping to a parsed upload, producing the canonical
/// catalog rows: product name, expiry, available quantity, order quantity 0.
///
/// Rows shorter than the header are padded with empty cells; quantity cells
/// that do not parse as a number are treated as 0, and negative quantities
/// are clamped to 0. Duplicate product names pass through as separate rows.
pub fn normalize(upload: &ParsedUpload, mapping: &ColumnMapping) -> AppResult<Vec<StockItem>> {
    let column_count = upload.headers.len();
    for (label, index) in [
        ("product name", mapping.name_col),
        ("expiry", mapping.expiry_col),
        ("quantity", mapping.qty_col),
    ] {
        if index >= column_count {
            return Err(AppError::UploadParse(format!(
                "{label} column index {index} is out of range for an upload with {column_count} columns"
            )));
        }
    }

    let items = upload
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("").trim();
            let available_qty = Decimal::from_str(cell(mapping.qty_col))
                .unwrap_or(Decimal::ZERO)
                .max(Decimal::ZERO);
            StockItem::new(cell(mapping.name_col), cell(mapping.expiry_col), available_qty)
        })
        .collect();

    Ok(items)
}
