// src/io/synthetic.rs

use crate::classification::YearMonth;
use crate::error::{PipelineError, PipelineResult};
use crate::model::{ConsumptionRecord, PriceEntry};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Generates a monthly demand schedule where every month has the same quantity.
pub fn generate_constant_demand(months: usize, value: f64) -> Vec<f64> {
    vec![value; months]
}

/// Generates a "Step" pattern: `before` until `step_at`, then `after`.
pub fn generate_step_demand(months: usize, before: f64, after: f64, step_at: usize) -> Vec<f64> {
    (0..months)
        .map(|m| if m < step_at { before } else { after })
        .collect()
}

/// Generates monthly demand from a Normal (Bell Curve) distribution.
///
/// # Arguments
/// * `months` - Length of the series.
/// * `mean` - The average monthly quantity.
/// * `std_dev` - The standard deviation (volatility).
///
/// Draws are rounded and negative values clamped to 0. A negative or NaN
/// `std_dev` is rejected.
pub fn generate_normal_demand<R: Rng>(
    rng: &mut R,
    months: usize,
    mean: f64,
    std_dev: f64,
) -> PipelineResult<Vec<f64>> {
    if !(std_dev >= 0.0) {
        return Err(PipelineError::Synthetic(format!(
            "std_dev must be a non-negative number, got {}",
            std_dev
        )));
    }
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| PipelineError::Synthetic(format!("normal({}, {}): {}", mean, std_dev, e)))?;

    Ok((0..months)
        .map(|_| {
            let draw = normal.sample(&mut *rng).round();
            if draw > 0.0 {
                draw
            } else {
                0.0
            }
        })
        .collect())
}

/// One movement per month, dated the 15th, starting at `start`.
pub fn monthly_records(
    item_code: &str,
    start: YearMonth,
    quantities: &[f64],
) -> PipelineResult<Vec<ConsumptionRecord>> {
    let mut records = Vec::with_capacity(quantities.len());
    let mut month = start;
    for &qty in quantities {
        let date = NaiveDate::from_ymd_opt(month.year, month.month, 15)
            .ok_or_else(|| PipelineError::Synthetic(format!("invalid month {}", month)))?;
        if qty > 0.0 {
            records.push(ConsumptionRecord::new(item_code, qty, date));
        }
        month = month.next();
    }
    Ok(records)
}

/// Movements plus a matching price table.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub consumption: Vec<ConsumptionRecord>,
    pub prices: Vec<PriceEntry>,
}

const ITEM_NAMES: [&str; 8] = [
    "BOLT M8",
    "HYDRAULIC FILTER",
    "HELI PUMP",
    "BEARING 6204",
    "HELICAL GEAR",
    "BRAKE PAD",
    "V-BELT",
    "SEAL KIT",
];

// Coefficients of variation cycled across SKUs: steady, moderate, lumpy
const CV_PROFILE: [f64; 3] = [0.2, 0.7, 1.6];

/// Builds a reproducible dataset of `skus` items over `months` months
/// starting January 2024. The same seed always gives the same data.
pub fn generate_dataset(skus: usize, months: usize, seed: u64) -> PipelineResult<SyntheticDataset> {
    if skus == 0 || months == 0 {
        return Err(PipelineError::Synthetic("need at least one SKU and one month".into()));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let start = YearMonth::new(2024, 1);

    let mut consumption = Vec::new();
    let mut prices = Vec::with_capacity(skus);
    for i in 0..skus {
        let code = format!("SKU-{:04}", i + 1);
        let name = ITEM_NAMES[i % ITEM_NAMES.len()];
        let unit_price = (rng.gen_range(1.0..500.0f64) * 100.0).round() / 100.0;
        let mean = rng.gen_range(5.0..200.0f64).round();
        let std_dev = mean * CV_PROFILE[i % CV_PROFILE.len()];

        let demand = generate_normal_demand(&mut rng, months, mean, std_dev)?;
        consumption.extend(monthly_records(&code, start, &demand)?);
        prices.push(PriceEntry::new(code, name, unit_price));
    }

    tracing::debug!(
        "synthetic dataset: {} SKUs, {} records, seed {}",
        skus,
        consumption.len(),
        seed
    );
    Ok(SyntheticDataset { consumption, prices })
}
