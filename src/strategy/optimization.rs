// src/strategy/optimization.rs

//! Replenishment parameters from classification and demand statistics.
//!
//! Every SKU is sized independently: a service-level z-score picked from
//! its ABC/XYZ classes, a safety stock under the square-root-of-lead-time
//! rule, a reorder point, and a classic EOQ.

use crate::model::{AbcClass, XyzClass};
use crate::pipeline::config::PolicyConfig;

/// Service-level z-score for a class pair.
///
/// Starts at `z_default`, takes the ABC value when the table has one, then
/// raises it to the XYZ value if that is higher. The stricter of the two
/// signals wins.
pub fn pick_z(config: &PolicyConfig, abc: AbcClass, xyz: XyzClass) -> f64 {
    let mut z = config.z_default;
    if let Some(z_abc) = config.z_by_abc.get(&abc) {
        z = *z_abc;
    }
    if let Some(z_xyz) = config.z_by_xyz.get(&xyz) {
        z = z.max(*z_xyz);
    }
    z
}

/// Safety stock.
///
/// # Formula
/// SS = Z * sqrt(LeadTime) * DailyStdDev
///
/// Assumes independent daily demand.
pub fn safety_stock(z: f64, lead_time_days: u32, daily_std: f64) -> f64 {
    z * (lead_time_days as f64).sqrt() * daily_std
}

/// Reorder point: expected demand over the lead time plus safety stock.
pub fn reorder_point(daily_mean: f64, lead_time_days: u32, safety_stock: f64) -> f64 {
    daily_mean * lead_time_days as f64 + safety_stock
}

/// Economic Order Quantity.
///
/// # Formula
/// EOQ = sqrt(2 * D * S / (H * C))
///
/// # Arguments
/// * `annual_demand` - D, units per year.
/// * `order_cost` - S, fixed cost per order.
/// * `holding_rate` - H, yearly carrying cost as a fraction of unit cost.
/// * `unit_cost` - C.
///
/// # Returns
/// 0 whenever D, S or H*C is not positive (or not a number).
pub fn eoq(annual_demand: f64, order_cost: f64, holding_rate: f64, unit_cost: f64) -> f64 {
    let d = finite_or_zero(annual_demand);
    let s = finite_or_zero(order_cost);
    let hc = finite_or_zero(holding_rate) * finite_or_zero(unit_cost);

    if d <= 0.0 || s <= 0.0 || hc <= 0.0 {
        return 0.0;
    }
    ((2.0 * d * s) / hc).sqrt()
}

/// Everything the calculator needs to know about one SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyInputs {
    pub abc: AbcClass,
    pub xyz: XyzClass,
    pub lead_time_days: u32,
    pub monthly_mean: f64,
    pub monthly_std: Option<f64>,
    pub annual_qty: f64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplenishmentPolicy {
    pub z_level: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub eoq: f64,
    pub stock_min: f64,
    pub stock_max: f64,
    pub on_hand: f64,
    pub below_rop: bool,
}

/// Sizes a replenishment policy for one SKU.
///
/// Daily figures divide the monthly ones by `days_per_month`; a missing
/// std counts as 0. There is no on-hand feed, so stock is taken as 0 and
/// any positive reorder point raises the below-ROP flag.
pub fn calculate_policy(inputs: &PolicyInputs, config: &PolicyConfig) -> ReplenishmentPolicy {
    let daily_mean = finite_or_zero(inputs.monthly_mean) / config.days_per_month;
    let daily_std = inputs.monthly_std.map(finite_or_zero).unwrap_or(0.0) / config.days_per_month;

    let z_level = pick_z(config, inputs.abc, inputs.xyz);
    let ss = safety_stock(z_level, inputs.lead_time_days, daily_std);
    let rop = reorder_point(daily_mean, inputs.lead_time_days, ss);

    let order_qty = if config.use_eoq {
        eoq(inputs.annual_qty, config.order_cost, config.holding_rate, inputs.unit_cost)
    } else {
        0.0
    };

    let on_hand = 0.0;
    ReplenishmentPolicy {
        z_level,
        safety_stock: ss,
        reorder_point: rop,
        eoq: order_qty,
        stock_min: rop,
        stock_max: rop + order_qty,
        on_hand,
        below_rop: on_hand < rop,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
