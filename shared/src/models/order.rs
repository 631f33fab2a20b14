//! Order log models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column headers of the persisted order log, in order.
pub const ORDER_LOG_HEADERS: [&str; 7] = [
    "Branch",
    "Order Time",
    "Product Name",
    "Expiry",
    "Available Qty",
    "Order Qty",
    "Type",
];

/// Timestamp format used in the persisted order log.
pub const ORDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Stock,
    #[serde(rename = "Special Request")]
    SpecialRequest,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Stock => "Stock",
            OrderType::SpecialRequest => "Special Request",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a persisted order type label is unrecognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order type: {0}")]
pub struct ParseOrderTypeError(pub String);

impl FromStr for OrderType {
    type Err = ParseOrderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Stock" => Ok(OrderType::Stock),
            "Special Request" => Ok(OrderType::SpecialRequest),
            other => Err(ParseOrderTypeError(other.to_string())),
        }
    }
}

/// One accepted order line as persisted in the order log.
///
/// Every row of one submission shares the same `branch` and `order_time`;
/// `available_qty` is the catalog snapshot at submission time (0 for special
/// requests, where no availability check applies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub branch: String,
    #[serde(with = "order_time_format")]
    pub order_time: NaiveDateTime,
    pub product_name: String,
    pub expiry: String,
    pub available_qty: Decimal,
    pub order_qty: u32,
    pub order_type: OrderType,
}

/// Serde helpers keeping `order_time` in the log's `YYYY-MM-DD HH:MM:SS`
/// shape across JSON as well.
pub mod order_time_format {
    use super::{NaiveDateTime, ORDER_TIME_FORMAT};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(ORDER_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, ORDER_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn order_type_round_trips_through_labels() {
        assert_eq!("Stock".parse::<OrderType>().unwrap(), OrderType::Stock);
        assert_eq!(
            "Special Request".parse::<OrderType>().unwrap(),
            OrderType::SpecialRequest
        );
        assert!("stock".parse::<OrderType>().is_err());
    }

    #[test]
    fn order_time_serializes_in_log_format() {
        let record = OrderRecord {
            branch: "North".to_string(),
            order_time: NaiveDate::from_ymd_opt(2024, 12, 23)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            product_name: "Paracetamol 500mg".to_string(),
            expiry: "2026-01".to_string(),
            available_qty: Decimal::from(10),
            order_qty: 2,
            order_type: OrderType::Stock,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["order_time"], "2024-12-23 09:30:00");
        assert_eq!(json["order_type"], "Stock");
    }
}
