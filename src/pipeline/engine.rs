// src/pipeline/engine.rs

use crate::classification::{classify_abc, classify_xyz, series_stats, MonthlyDemand, ValueRank};
use crate::error::{PipelineError, PipelineResult};
use crate::model::{AbcClass, ConsumptionRecord, PriceEntry, ReorderAlert, SkuProfile};
use crate::pipeline::config::PolicyConfig;
use crate::strategy::implementations::{resolve_lead_time, SupplierResolver};
use crate::strategy::optimization::{calculate_policy, PolicyInputs};
use crate::strategy::traits::SkuContext;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRun {
    pub monthly: MonthlyDemand,
    /// Sorted by ABC, then XYZ, then annual quantity descending.
    pub profiles: Vec<SkuProfile>,
    /// Profiles below their reorder point, same order.
    pub alerts: Vec<ReorderAlert>,
}

/// Classification and policy stages over one input snapshot.
///
/// Holds only immutable settings, so `run` can be called any number of
/// times and gives identical output for identical input.
#[derive(Debug)]
pub struct PolicyPipeline {
    config: PolicyConfig,
    suppliers: SupplierResolver,
}

impl PolicyPipeline {
    /// Fails when `config` does not pass `PolicyConfig::validate`.
    pub fn new(config: PolicyConfig, suppliers: SupplierResolver) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config, suppliers })
    }

    /// Builds one profile per SKU seen in `consumption`. SKUs that only
    /// appear in `prices` are ignored.
    pub fn run(&self, consumption: &[ConsumptionRecord], prices: &[PriceEntry]) -> PipelineResult<PolicyRun> {
        if consumption.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        tracing::info!(
            "running ABC-XYZ over {} records, {} price entries",
            consumption.len(),
            prices.len()
        );

        let price_book = build_price_book(prices);

        // Stage 2: dense monthly series
        let monthly = MonthlyDemand::aggregate(consumption);
        tracing::debug!("{} SKUs over {} months", monthly.len(), monthly.months().len());

        // Stage 3: value ranking
        let ranks = classify_abc(consumption, &price_book, self.config.abc_cuts);
        let rank_by_code: HashMap<&str, &ValueRank> =
            ranks.iter().map(|r| (r.item_code.as_str(), r)).collect();

        // Stages 4-6, per SKU
        let mut profiles: Vec<SkuProfile> = monthly
            .iter()
            .map(|(code, series)| {
                let abc = rank_by_code.get(code).map(|r| r.class).unwrap_or(AbcClass::C);
                self.build_profile(code, series, abc, price_book.get(code))
            })
            .collect();

        profiles.sort_by(presentation_order);

        let alerts: Vec<ReorderAlert> = profiles
            .iter()
            .filter(|p| p.below_rop)
            .map(ReorderAlert::from)
            .collect();

        tracing::info!("classified {} SKUs, {} below reorder point", profiles.len(), alerts.len());
        Ok(PolicyRun {
            monthly,
            profiles,
            alerts,
        })
    }

    fn build_profile(
        &self,
        code: &str,
        series: &[f64],
        abc: AbcClass,
        price: Option<&PriceEntry>,
    ) -> SkuProfile {
        let stats = series_stats(series);
        let xyz = classify_xyz(&stats, self.config.xyz_cuts);

        let item_name = price.map(|p| p.item_name.clone()).unwrap_or_default();
        let unit_cost = price.map(|p| p.unit_price).unwrap_or(PriceEntry::DEFAULT_UNIT_PRICE);

        let supplier = self.suppliers.resolve(&SkuContext {
            item_code: code,
            item_name: &item_name,
        });
        let lead_time_days = resolve_lead_time(&self.config, supplier);

        let policy = calculate_policy(
            &PolicyInputs {
                abc,
                xyz,
                lead_time_days,
                monthly_mean: stats.mean,
                monthly_std: stats.std,
                annual_qty: stats.total,
                unit_cost,
            },
            &self.config,
        );

        SkuProfile {
            item_code: code.to_string(),
            item_name,
            monthly_mean: stats.mean,
            monthly_std: stats.std,
            annual_qty: stats.total,
            abc,
            xyz,
            unit_cost,
            acv: stats.total * unit_cost,
            z_level: policy.z_level,
            lead_time_days,
            supplier,
            safety_stock: policy.safety_stock,
            reorder_point: policy.reorder_point,
            eoq: policy.eoq,
            stock_min: policy.stock_min,
            stock_max: policy.stock_max,
            on_hand: policy.on_hand,
            below_rop: policy.below_rop,
        }
    }
}

/// First entry per code wins; unusable prices fall back to the default.
fn build_price_book(prices: &[PriceEntry]) -> HashMap<String, PriceEntry> {
    let mut book = HashMap::with_capacity(prices.len());
    for entry in prices {
        book.entry(entry.item_code.clone()).or_insert_with(|| {
            let unit_price = if entry.unit_price.is_finite() {
                entry.unit_price.max(0.0)
            } else {
                PriceEntry::DEFAULT_UNIT_PRICE
            };
            PriceEntry {
                unit_price,
                ..entry.clone()
            }
        });
    }
    book
}

fn presentation_order(a: &SkuProfile, b: &SkuProfile) -> Ordering {
    a.abc
        .cmp(&b.abc)
        .then(a.xyz.cmp(&b.xyz))
        .then(b.annual_qty.total_cmp(&a.annual_qty))
}
