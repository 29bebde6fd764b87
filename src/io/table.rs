// src/io/table.rs

//! Header-plus-rows view over a CSV or Excel export.
//!
//! The format is picked from the file extension. Either way, headers come
//! out slugged and cells come out as trimmed text, so the loaders apply the
//! same column detection and coercion to both.

use crate::error::{PipelineError, PipelineResult};
use crate::io::columns::slug;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, Trim};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub source_name: String,
    /// Slugged header names, in file order.
    pub columns: Vec<String>,
    /// Non-blank data rows. Rows may be shorter than `columns`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of the first column whose slug satisfies `pred`.
    pub fn find<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.columns.iter().position(|s| pred(s))
    }

    pub fn from_csv<R: Read>(reader: R, source_name: &str) -> PipelineResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let columns = rdr.headers()?.iter().map(slug).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
            push_non_blank(&mut rows, row);
        }

        Ok(Self {
            source_name: source_name.to_string(),
            columns,
            rows,
        })
    }

    /// Reads the first sheet of a workbook. The first row is the header.
    pub fn from_excel(path: &Path) -> PipelineResult<Self> {
        let source_name = path.display().to_string();
        let mut workbook = open_workbook_auto(path).map_err(|e| excel_error(&source_name, e))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| excel_error(&source_name, "workbook has no sheets"))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| excel_error(&source_name, e))?;

        let mut sheet_rows = range.rows();
        let columns = match sheet_rows.next() {
            Some(header) => header.iter().map(|c| slug(&cell_text(c))).collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            push_non_blank(&mut rows, data_row.iter().map(cell_text).collect());
        }

        tracing::debug!("{}: sheet '{}', {} rows", source_name, sheet_name, rows.len());
        Ok(Self {
            source_name,
            columns,
            rows,
        })
    }

    /// Opens `path` as a workbook or as CSV depending on its extension.
    pub fn open(path: &Path) -> PipelineResult<Self> {
        if is_excel_path(path) {
            Self::from_excel(path)
        } else {
            let file = File::open(path)?;
            Self::from_csv(file, &path.display().to_string())
        }
    }
}

/// Cell `idx` of `row`, or "" when the row is short.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

pub fn is_excel_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXCEL_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn push_non_blank(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|v| !v.is_empty()) {
        rows.push(row);
    }
}

fn excel_error(source_name: &str, err: impl fmt::Display) -> PipelineError {
    PipelineError::Excel {
        source_name: source_name.to_string(),
        message: err.to_string(),
    }
}

/// Text of a sheet cell. Date cells become ISO dates; whole numbers lose
/// their ".0" so numeric item codes read like their CSV form.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::DateTime(dt) => excel_serial_date(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Calendar date of an Excel serial day number (1900 date system).
///
/// Serials before 1900-03-01 are off by one in Excel itself and are not
/// corrected.
pub fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}
