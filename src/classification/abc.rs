// src/classification/abc.rs

use crate::model::{AbcClass, ConsumptionRecord, PriceEntry};
use std::collections::HashMap;

/// A SKU's position in the descending-value ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRank {
    pub item_code: String,
    pub value: f64,
    pub units: f64,
    /// Cumulative share of total value up to and including this SKU.
    pub pct: f64,
    pub class: AbcClass,
}

/// Maps a cumulative share onto a class.
///
/// `[0, cut_a]` is A (closed at both ends),
/// `(cut_a, cut_b]` is B, anything above is C.
pub fn abc_class_for(pct: f64, cuts: (f64, f64)) -> AbcClass {
    let (cut_a, cut_b) = cuts;
    if pct <= cut_a {
        AbcClass::A
    } else if pct <= cut_b {
        AbcClass::B
    } else {
        AbcClass::C
    }
}

/// Ranks SKUs by total consumption value and assigns ABC bands.
///
/// Value is `sum(quantity * unit_price)`; SKUs without a price entry use
/// `PriceEntry::DEFAULT_UNIT_PRICE`. Equal values keep the order in which
/// the SKU first appears in `records`. The top-ranked SKU is A whatever
/// its own share.
pub fn classify_abc(
    records: &[ConsumptionRecord],
    prices: &HashMap<String, PriceEntry>,
    cuts: (f64, f64),
) -> Vec<ValueRank> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();

    for record in records {
        let price = prices
            .get(&record.item_code)
            .map(|p| p.unit_price)
            .unwrap_or(PriceEntry::DEFAULT_UNIT_PRICE);

        let entry = totals.entry(record.item_code.as_str()).or_insert_with(|| {
            order.push(record.item_code.clone());
            (0.0, 0.0)
        });
        entry.0 += record.quantity * price;
        entry.1 += record.quantity;
    }

    let mut ranks: Vec<ValueRank> = order
        .into_iter()
        .map(|code| {
            let (value, units) = totals.get(code.as_str()).copied().unwrap_or((0.0, 0.0));
            ValueRank {
                item_code: code,
                value,
                units,
                pct: 0.0,
                class: AbcClass::A,
            }
        })
        .collect();

    // sort_by is stable
    ranks.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total_value: f64 = ranks.iter().map(|r| r.value).sum();
    let mut cumulative = 0.0;
    for (position, rank) in ranks.iter_mut().enumerate() {
        cumulative += rank.value;
        rank.pct = if total_value > 0.0 {
            cumulative / total_value
        } else {
            0.0
        };
        rank.class = if position == 0 {
            AbcClass::A
        } else {
            abc_class_for(rank.pct, cuts)
        };
    }

    ranks
}
