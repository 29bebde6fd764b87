// src/classification/monthly.rs

use crate::model::ConsumptionRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// A calendar month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32, // 1..=12
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Whole months from `self` to `later`.
    pub fn months_until(self, later: YearMonth) -> i64 {
        later.ordinal() - self.ordinal()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Per-SKU monthly totals over one shared, gap-free month range.
///
/// Every series has exactly `months().len()` entries. Months with no
/// movements for a SKU hold 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyDemand {
    months: Vec<YearMonth>,
    series: BTreeMap<String, Vec<f64>>,
}

impl MonthlyDemand {
    /// Buckets records by (item, month) and zero-fills every SKU over the
    /// range from the earliest to the latest observed month.
    pub fn aggregate(records: &[ConsumptionRecord]) -> Self {
        let bounds = records
            .iter()
            .map(|r| YearMonth::from_date(r.date))
            .fold(None, |acc: Option<(YearMonth, YearMonth)>, ym| match acc {
                None => Some((ym, ym)),
                Some((lo, hi)) => Some((lo.min(ym), hi.max(ym))),
            });

        let Some((first, last)) = bounds else {
            return Self::default();
        };

        let mut months = Vec::with_capacity(first.months_until(last) as usize + 1);
        let mut cursor = first;
        while cursor <= last {
            months.push(cursor);
            cursor = cursor.next();
        }

        let mut series: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            let idx = first.months_until(YearMonth::from_date(record.date)) as usize;
            let buckets = series
                .entry(record.item_code.clone())
                .or_insert_with(|| vec![0.0; months.len()]);
            buckets[idx] += record.quantity;
        }

        Self { months, series }
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn series(&self, item_code: &str) -> Option<&[f64]> {
        self.series.get(item_code).map(Vec::as_slice)
    }

    /// SKUs in ascending item-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Summary statistics of one monthly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    /// Sample standard deviation (N-1). None below two observations.
    pub std: Option<f64>,
    pub total: f64,
}

pub fn series_stats(series: &[f64]) -> SeriesStats {
    let n = series.len();
    let total: f64 = series.iter().sum();
    let mean = if n == 0 { 0.0 } else { total / n as f64 };

    let std = if n < 2 {
        None
    } else {
        let ss: f64 = series.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    };

    SeriesStats { mean, std, total }
}
