//! Order intake: batch validation and the append-only order log
//!
//! Validation is all-or-nothing: a batch with any over-availability line is
//! rejected whole, and the branch corrects its cart and resubmits. The log
//! is a single shared CSV file that only ever grows, except for the admin's
//! explicit clear.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    validation, OrderRecord, OrderType, RejectedLine, ORDER_LOG_HEADERS, ORDER_TIME_FORMAT,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// One candidate order line as submitted by a branch: a catalog row plus the
/// user-entered order quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
    pub product_name: String,
    #[serde(default)]
    pub expiry: String,
    pub available_qty: Decimal,
    pub order_qty: u32,
}

/// An order line that passed validation and is ready for append.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLine {
    pub product_name: String,
    pub expiry: String,
    pub available_qty: Decimal,
    pub order_qty: u32,
    pub order_type: OrderType,
}

/// Validate a stock batch: drop zero-quantity rows, then accept only if
/// every remaining line fits within its availability snapshot. Any
/// over-limit line rejects the entire batch — no partial commit.
pub fn validate_batch(lines: &[OrderLineInput]) -> AppResult<Vec<ValidatedLine>> {
    let requested: Vec<&OrderLineInput> =
        lines.iter().filter(|line| line.order_qty > 0).collect();

    if requested.is_empty() {
        return Err(AppError::ValidationRejected {
            message: "No quantities entered".to_string(),
            rejected: Vec::new(),
        });
    }

    let rejected: Vec<RejectedLine> = requested
        .iter()
        .filter(|line| validation::exceeds_available(line.order_qty, line.available_qty))
        .map(|line| RejectedLine {
            product_name: line.product_name.clone(),
            requested_qty: line.order_qty,
            available_qty: line.available_qty,
        })
        .collect();

    if !rejected.is_empty() {
        return Err(AppError::ValidationRejected {
            message: "Requested quantities exceed available stock".to_string(),
            rejected,
        });
    }

    Ok(requested
        .into_iter()
        .map(|line| ValidatedLine {
            product_name: line.product_name.clone(),
            expiry: line.expiry.clone(),
            available_qty: line.available_qty,
            order_qty: line.order_qty,
            order_type: OrderType::Stock,
        })
        .collect())
}

/// Validate a single special request: an item not in the catalog, submitted
/// with a free-text name. No availability check; the availability snapshot
/// is recorded as 0.
pub fn validate_special_request(product_name: &str, order_qty: u32) -> AppResult<ValidatedLine> {
    validation::validate_special_request(product_name, order_qty).map_err(|msg| {
        AppError::ValidationRejected {
            message: msg.to_string(),
            rejected: Vec::new(),
        }
    })?;

    Ok(ValidatedLine {
        product_name: product_name.trim().to_string(),
        expiry: "New Request".to_string(),
        available_qty: Decimal::ZERO,
        order_qty,
        order_type: OrderType::SpecialRequest,
    })
}

/// File-backed append-only order log shared by all branches.
#[derive(Debug, Clone)]
pub struct OrderLogStore {
    path: PathBuf,
}

impl OrderLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a validated batch, stamping every line with the submitting
    /// branch and one shared submission timestamp. Creates the store with a
    /// header row on first append; never touches existing rows. Lines land
    /// as a contiguous block in input order.
    pub fn append(
        &self,
        branch: &str,
        order_time: NaiveDateTime,
        lines: &[ValidatedLine],
    ) -> AppResult<Vec<OrderRecord>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let is_new = !self.path.exists();
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);

        if is_new {
            writer.write_record(ORDER_LOG_HEADERS)?;
        }

        let mut appended = Vec::with_capacity(lines.len());
        for line in lines {
            let record = OrderRecord {
                branch: branch.to_string(),
                order_time,
                product_name: line.product_name.clone(),
                expiry: line.expiry.clone(),
                available_qty: line.available_qty,
                order_qty: line.order_qty,
                order_type: line.order_type,
            };
            writer.write_record(record_row(&record))?;
            appended.push(record);
        }
        writer.flush()?;

        tracing::info!(
            branch,
            rows = appended.len(),
            path = %self.path.display(),
            "order batch appended"
        );
        Ok(appended)
    }

    /// Read the full order history in append order. `None` means the store
    /// does not exist yet ("no data"), distinct from an empty log.
    pub fn read_all(&self) -> AppResult<Option<Vec<OrderRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(self.parse_row(&record)?);
        }
        Ok(Some(records))
    }

    /// Irreversibly truncate the log. Clearing an absent store is a no-op;
    /// the next append recreates it from empty.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "order log cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn parse_row(&self, record: &csv::StringRecord) -> AppResult<OrderRecord> {
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let corrupt = |what: &str, detail: String| {
            AppError::Storage(format!(
                "order log {} is corrupt: bad {what}: {detail}",
                self.path.display()
            ))
        };

        Ok(OrderRecord {
            branch: cell(0),
            order_time: NaiveDateTime::parse_from_str(&cell(1), ORDER_TIME_FORMAT)
                .map_err(|e| corrupt("order time", format!("{:?}: {e}", cell(1))))?,
            product_name: cell(2),
            expiry: cell(3),
            available_qty: Decimal::from_str(&cell(4))
                .map_err(|e| corrupt("available quantity", format!("{:?}: {e}", cell(4))))?,
            order_qty: cell(5)
                .parse()
                .map_err(|e| corrupt("order quantity", format!("{:?}: {e}", cell(5))))?,
            order_type: OrderType::from_str(&cell(6))
                .map_err(|e| corrupt("order type", e.to_string()))?,
        })
    }
}

/// The seven canonical columns of one log row, in header order. The typed
/// record guarantees every column is present; optional text fields fall back
/// to the empty-string sentinel at construction time.
pub fn record_row(record: &OrderRecord) -> [String; 7] {
    [
        record.branch.clone(),
        record.order_time.format(ORDER_TIME_FORMAT).to_string(),
        record.product_name.clone(),
        record.expiry.clone(),
        record.available_qty.to_string(),
        record.order_qty.to_string(),
        record.order_type.as_str().to_string(),
    ]
}
