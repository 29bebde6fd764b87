// src/model/profile.rs

use crate::model::classes::{AbcClass, Supplier, XyzClass};

/// Classification and replenishment parameters for one SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuProfile {
    pub item_code: String,
    pub item_name: String,

    // Demand statistics over the dense monthly series
    pub monthly_mean: f64,
    pub monthly_std: Option<f64>, // None with fewer than 2 months
    pub annual_qty: f64,

    // Classification
    pub abc: AbcClass,
    pub xyz: XyzClass,
    pub unit_cost: f64,
    pub acv: f64,

    // Policy
    pub z_level: f64,
    pub lead_time_days: u32,
    pub supplier: Supplier,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub eoq: f64,
    pub stock_min: f64,
    pub stock_max: f64,

    // No live inventory feed: always 0
    pub on_hand: f64,
    pub below_rop: bool,
}

impl SkuProfile {
    /// Quantity to bring the SKU back up to `stock_max`.
    pub fn suggested_order_qty(&self) -> f64 {
        (self.stock_max - self.on_hand).max(0.0)
    }
}

/// A profile that sits below its reorder point.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderAlert {
    pub profile: SkuProfile,
    pub suggested_order_qty: f64,
}

impl From<&SkuProfile> for ReorderAlert {
    fn from(profile: &SkuProfile) -> Self {
        Self {
            suggested_order_qty: profile.suggested_order_qty(),
            profile: profile.clone(),
        }
    }
}
