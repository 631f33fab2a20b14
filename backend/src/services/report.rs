//! Consolidation reporter
//!
//! Aggregates the order log into a master view plus one partition per
//! branch, for admin export. Pure function of the log: no mutation, safe to
//! invoke repeatedly, identical input yields byte-identical output.

use shared::{OrderRecord, ORDER_LOG_HEADERS};
use std::collections::HashSet;
use std::io::{Cursor, Write};

use crate::error::{AppError, AppResult};

/// Name of the first workbook sheet holding the full, unpartitioned log.
pub const MASTER_SHEET_NAME: &str = "MASTER_ALL";

/// Sheet identifiers are truncated to this many characters.
pub const MAX_SHEET_NAME_LEN: usize = 30;

/// One partition of the consolidation workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<OrderRecord>,
}

/// The consolidation workbook: master sheet first, then one sheet per
/// branch in order of first appearance in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Build the consolidation workbook from the full order log.
pub fn build_workbook(records: &[OrderRecord]) -> Workbook {
    let mut used_names = HashSet::new();
    used_names.insert(MASTER_SHEET_NAME.to_string());

    let mut sheets = vec![Sheet {
        name: MASTER_SHEET_NAME.to_string(),
        rows: records.to_vec(),
    }];

    // Partition by branch, preserving first-appearance order and row order.
    let mut branch_order: Vec<&str> = Vec::new();
    for record in records {
        if !branch_order.contains(&record.branch.as_str()) {
            branch_order.push(&record.branch);
        }
    }

    for branch in branch_order {
        let rows: Vec<OrderRecord> = records
            .iter()
            .filter(|r| r.branch == branch)
            .cloned()
            .collect();
        let name = unique_sheet_name(branch, &mut used_names);
        sheets.push(Sheet { name, rows });
    }

    Workbook { sheets }
}

/// Sanitize a branch name for use as a sheet identifier: strip characters
/// illegal in tab names and truncate to the length bound. A name that
/// sanitizes away entirely falls back to "Branch" so the sheet never ends
/// up nameless.
pub fn sanitize_sheet_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| !matches!(c, ':' | '/'))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if sanitized.is_empty() {
        "Branch".to_string()
    } else {
        sanitized
    }
}

/// Sanitize and disambiguate: two branches that sanitize to the same
/// identifier get numeric suffixes instead of silently overwriting each
/// other's partition.
fn unique_sheet_name(branch: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(branch);
    if used.insert(base.clone()) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Render order records as CSV with the canonical log header.
pub fn records_to_csv(records: &[OrderRecord]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(ORDER_LOG_HEADERS)?;
    for record in records {
        writer.write_record(super::orders::record_row(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV writer error: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV encoding error: {e}")))
}

/// Package the workbook as a zip archive with one CSV file per sheet.
pub fn workbook_to_zip(workbook: &Workbook) -> AppResult<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for sheet in &workbook.sheets {
        zip.start_file(format!("{}.csv", sheet.name), options)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("zip error: {e}")))?;
        zip.write_all(records_to_csv(&sheet.rows)?.as_bytes())?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("zip error: {e}")))?;
    Ok(cursor.into_inner())
}
