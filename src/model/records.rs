// src/model/records.rs

use chrono::NaiveDate;

/// One movement line after normalization.
///
/// Codes are already trimmed and upper-cased, quantities are >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    pub item_code: String,
    pub quantity: f64,
    pub date: NaiveDate,
}

impl ConsumptionRecord {
    pub fn new(item_code: impl Into<String>, quantity: f64, date: NaiveDate) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
            date,
        }
    }
}

/// Catalog row for a single SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub item_code: String,
    pub item_name: String,
    pub unit_price: f64,
}

impl PriceEntry {
    /// Price used when a SKU has no usable price, so value ranking
    /// falls back to plain units.
    pub const DEFAULT_UNIT_PRICE: f64 = 1.0;

    pub fn new(item_code: impl Into<String>, item_name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            unit_price,
        }
    }
}
