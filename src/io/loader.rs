// src/io/loader.rs

//! Readers for movement and price exports (CSV or Excel).
//!
//! Header names vary between ERP exports, so columns are located by their
//! slugged names (see `io::columns`). Only a missing item-code or date
//! column is fatal; bad cell values are coerced or the row is dropped.

use crate::error::{PipelineError, PipelineResult};
use crate::io::columns;
use crate::io::table::{cell, RawTable};
use crate::model::{ConsumptionRecord, PriceEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parses day-first and ISO dates, with or without a time part.
///
/// Timestamps carrying an offset ("...Z", "...+02:00") keep the calendar
/// date of that offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Parses a number, accepting a decimal comma ("12,5").
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = raw.parse::<f64>().ok().or_else(|| {
        if raw.contains(',') && !raw.contains('.') {
            raw.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    });
    parsed.filter(|v| v.is_finite())
}

fn missing(source_name: &str, column: &str) -> PipelineError {
    PipelineError::MissingColumn {
        source_name: source_name.to_string(),
        column: column.to_string(),
    }
}

/// Turns movement rows into consumption records.
///
/// Without a quantity column each line counts as one unit. Rows with an
/// empty item code or an unparseable date are dropped.
pub fn consumption_from_table(table: &RawTable) -> PipelineResult<Vec<ConsumptionRecord>> {
    let source_name = table.source_name.as_str();
    let item_idx = table
        .find(columns::is_item_code_column)
        .ok_or_else(|| missing(source_name, "item code"))?;
    let date_idx = table
        .find(columns::is_date_column)
        .ok_or_else(|| missing(source_name, "date"))?;
    let qty_idx = table.find(columns::is_quantity_column);
    if qty_idx.is_none() {
        tracing::warn!("{}: no quantity column, counting each line as 1", source_name);
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut bad_dates = 0usize;
    for row in &table.rows {
        let code = cell(row, item_idx);
        if code.is_empty() {
            continue;
        }
        let Some(date) = parse_date(cell(row, date_idx)) else {
            bad_dates += 1;
            continue;
        };
        let quantity = match qty_idx {
            Some(idx) => parse_number(cell(row, idx)).unwrap_or(0.0).max(0.0),
            None => 1.0,
        };
        records.push(ConsumptionRecord::new(code.to_uppercase(), quantity, date));
    }

    if bad_dates > 0 {
        tracing::warn!("{}: dropped {} rows with unparseable dates", source_name, bad_dates);
    }
    tracing::debug!("{}: {} consumption records", source_name, records.len());
    Ok(records)
}

/// Turns price rows into price entries. Duplicate codes keep their first row.
pub fn prices_from_table(table: &RawTable) -> PipelineResult<Vec<PriceEntry>> {
    let source_name = table.source_name.as_str();
    let code_idx = table
        .find(columns::is_price_code_column)
        .ok_or_else(|| missing(source_name, "item code"))?;
    let name_idx = table.find(columns::is_price_name_column);
    let price_idx = table.find(columns::is_price_column);

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for row in &table.rows {
        let code = cell(row, code_idx).to_uppercase();
        if code.is_empty() || !seen.insert(code.clone()) {
            continue;
        }
        let name = name_idx.map(|i| cell(row, i).to_string()).unwrap_or_default();
        let unit_price = price_idx
            .and_then(|i| parse_number(cell(row, i)))
            .unwrap_or(PriceEntry::DEFAULT_UNIT_PRICE)
            .max(0.0);
        entries.push(PriceEntry::new(code, name, unit_price));
    }

    tracing::debug!("{}: {} price entries", source_name, entries.len());
    Ok(entries)
}

/// Reads movement lines from CSV text.
pub fn read_consumption<R: Read>(reader: R, source_name: &str) -> PipelineResult<Vec<ConsumptionRecord>> {
    consumption_from_table(&RawTable::from_csv(reader, source_name)?)
}

/// Reads a price table from CSV text.
pub fn read_prices<R: Read>(reader: R, source_name: &str) -> PipelineResult<Vec<PriceEntry>> {
    prices_from_table(&RawTable::from_csv(reader, source_name)?)
}

/// Reads a movement file, CSV or workbook by extension.
pub fn read_consumption_file(path: &Path) -> PipelineResult<Vec<ConsumptionRecord>> {
    consumption_from_table(&RawTable::open(path)?)
}

/// Reads a price file, CSV or workbook by extension.
pub fn read_prices_file(path: &Path) -> PipelineResult<Vec<PriceEntry>> {
    prices_from_table(&RawTable::open(path)?)
}

/// Concatenates several movement files in the order given.
pub fn read_consumption_files(paths: &[&Path]) -> PipelineResult<Vec<ConsumptionRecord>> {
    let mut all = Vec::new();
    for path in paths {
        all.extend(read_consumption_file(path)?);
    }
    Ok(all)
}
