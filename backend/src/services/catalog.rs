//! Stock catalog store
//!
//! The catalog is a single CSV file entirely replaced on each admin upload.
//! Replace-not-merge is deliberate: items omitted from a new upload are gone.

use rust_decimal::Decimal;
use shared::{StockItem, CATALOG_HEADERS};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// File-backed store for the current stock catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically overwrite the persisted catalog. Writes to a sibling temp
    /// file first and renames it into place, so a failed write never leaves
    /// a partially overwritten catalog behind.
    pub fn replace(&self, items: &[StockItem]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("csv.tmp");
        {
            let file = fs::File::create(&temp_path)?;
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(CATALOG_HEADERS)?;
            for item in items {
                writer.write_record([
                    item.product_name.as_str(),
                    item.expiry.as_str(),
                    &item.available_qty.to_string(),
                    &item.order_qty.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;

        tracing::info!(rows = items.len(), path = %self.path.display(), "stock catalog replaced");
        Ok(())
    }

    /// Load the current catalog. `None` means no upload has ever happened —
    /// callers must surface that as "awaiting first upload", which is not
    /// the same as an empty catalog.
    pub fn load(&self) -> AppResult<Option<Vec<StockItem>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut items = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
            let corrupt = |what: &str, detail: String| {
                AppError::Storage(format!(
                    "stock file {} is corrupt: bad {what}: {detail}",
                    self.path.display()
                ))
            };
            items.push(StockItem {
                product_name: cell(0),
                expiry: cell(1),
                available_qty: Decimal::from_str(&cell(2))
                    .map_err(|e| corrupt("available quantity", format!("{:?}: {e}", cell(2))))?,
                order_qty: cell(3)
                    .parse()
                    .map_err(|e| corrupt("order quantity", format!("{:?}: {e}", cell(3))))?,
            });
        }
        Ok(Some(items))
    }
}

/// Filter catalog rows by a search term matched case-insensitively against
/// every column. An empty term returns the catalog unchanged.
pub fn filter_catalog(items: Vec<StockItem>, term: &str) -> Vec<StockItem> {
    let term = term.trim();
    if term.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| item.matches(term)).collect()
}
