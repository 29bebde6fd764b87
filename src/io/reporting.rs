// src/io/reporting.rs

use crate::classification::MonthlyDemand;
use crate::error::PipelineResult;
use crate::model::{AbcClass, ReorderAlert, SkuProfile, XyzClass};
use crate::pipeline::engine::PolicyRun;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MASTER_FILE: &str = "abcxyz_master.csv";
pub const MONTHLY_FILE: &str = "monthly_demand.csv";
pub const ALERTS_FILE: &str = "reorder_alerts.csv";

/// One report line. The supplier stays internal; only its lead time is
/// shown.
#[derive(Debug, Serialize)]
pub struct ProfileRow<'a> {
    pub item_code: &'a str,
    pub item_name: &'a str,
    pub monthly_mean: f64,
    pub monthly_std: Option<f64>,
    pub annual_qty: f64,
    #[serde(rename = "ABC")]
    pub abc: AbcClass,
    #[serde(rename = "XYZ")]
    pub xyz: XyzClass,
    pub unit_cost: f64,
    #[serde(rename = "ACV")]
    pub acv: f64,
    pub z_level: f64,
    pub lead_time_days: u32,
    #[serde(rename = "SS")]
    pub safety_stock: f64,
    #[serde(rename = "ROP")]
    pub reorder_point: f64,
    #[serde(rename = "EOQ")]
    pub eoq: f64,
    #[serde(rename = "SMIN")]
    pub stock_min: f64,
    #[serde(rename = "SMAX")]
    pub stock_max: f64,
    #[serde(rename = "OnHand")]
    pub on_hand: f64,
    #[serde(rename = "BelowROP")]
    pub below_rop: bool,
    // Alerts file only
    #[serde(rename = "SuggestedOrderQty", skip_serializing_if = "Option::is_none")]
    pub suggested_order_qty: Option<f64>,
}

impl<'a> From<&'a SkuProfile> for ProfileRow<'a> {
    fn from(p: &'a SkuProfile) -> Self {
        Self {
            item_code: &p.item_code,
            item_name: &p.item_name,
            monthly_mean: p.monthly_mean,
            monthly_std: p.monthly_std,
            annual_qty: p.annual_qty,
            abc: p.abc,
            xyz: p.xyz,
            unit_cost: p.unit_cost,
            acv: p.acv,
            z_level: p.z_level,
            lead_time_days: p.lead_time_days,
            safety_stock: p.safety_stock,
            reorder_point: p.reorder_point,
            eoq: p.eoq,
            stock_min: p.stock_min,
            stock_max: p.stock_max,
            on_hand: p.on_hand,
            below_rop: p.below_rop,
            suggested_order_qty: None,
        }
    }
}

impl<'a> From<&'a ReorderAlert> for ProfileRow<'a> {
    fn from(alert: &'a ReorderAlert) -> Self {
        Self {
            suggested_order_qty: Some(alert.suggested_order_qty),
            ..ProfileRow::from(&alert.profile)
        }
    }
}

/// Writes the per-SKU policy table. The header comes from the first row,
/// so an empty slice writes an empty file.
pub fn write_master<W: Write>(writer: W, profiles: &[SkuProfile]) -> PipelineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for profile in profiles {
        wtr.serialize(ProfileRow::from(profile))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the reorder alert subset with its suggested order quantity.
pub fn write_alerts<W: Write>(writer: W, alerts: &[ReorderAlert]) -> PipelineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for alert in alerts {
        wtr.serialize(ProfileRow::from(alert))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the monthly series as a wide table, one column per month.
pub fn write_monthly<W: Write>(writer: W, monthly: &MonthlyDemand) -> PipelineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["item_code".to_string()];
    header.extend(monthly.months().iter().map(|m| m.to_string()));
    wtr.write_record(&header)?;

    for (code, series) in monthly.iter() {
        let mut row = vec![code.to_string()];
        row.extend(series.iter().map(|q| q.to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes all three reports under `<output_dir>/csv/` and returns that
/// directory.
pub fn write_run(output_dir: &Path, run: &PolicyRun) -> PipelineResult<PathBuf> {
    let csv_dir = output_dir.join("csv");
    fs::create_dir_all(&csv_dir)?;

    write_monthly(fs::File::create(csv_dir.join(MONTHLY_FILE))?, &run.monthly)?;
    write_master(fs::File::create(csv_dir.join(MASTER_FILE))?, &run.profiles)?;
    write_alerts(fs::File::create(csv_dir.join(ALERTS_FILE))?, &run.alerts)?;

    tracing::info!(
        "exported {} profiles and {} alerts to '{}'",
        run.profiles.len(),
        run.alerts.len(),
        csv_dir.display()
    );
    Ok(csv_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConsumptionRecord;
    use crate::pipeline::config::PolicyConfig;
    use crate::pipeline::engine::PolicyPipeline;
    use crate::strategy::implementations::SupplierResolver;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn sample_run() -> PolicyRun {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let records = vec![
            ConsumptionRecord::new("A", 10.0, d(1)),
            ConsumptionRecord::new("A", 10.0, d(3)),
            ConsumptionRecord::new("B", 0.0, d(2)),
        ];
        PolicyPipeline::new(
            PolicyConfig::default(),
            SupplierResolver::standard(HashSet::new(), HashSet::new()),
        )
        .unwrap()
        .run(&records, &[])
        .unwrap()
    }

    #[test]
    fn monthly_table_is_wide() {
        let run = sample_run();
        let mut buf = Vec::new();
        write_monthly(&mut buf, &run.monthly).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "item_code,2024-01,2024-02,2024-03");
        assert_eq!(lines[1], "A,10,0,10");
        assert_eq!(lines[2], "B,0,0,0");
    }

    #[test]
    fn master_hides_supplier() {
        let run = sample_run();
        let mut buf = Vec::new();
        write_master(&mut buf, &run.profiles).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "item_code,item_name,monthly_mean,monthly_std,annual_qty,ABC,XYZ,unit_cost,ACV,\
             z_level,lead_time_days,SS,ROP,EOQ,SMIN,SMAX,OnHand,BelowROP"
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn master_rows_read_back() {
        let run = sample_run();
        let mut buf = Vec::new();
        write_master(&mut buf, &run.profiles).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let headers = rdr.headers().unwrap().clone();
        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

        let a = rows.iter().find(|r| &r[0] == "A").unwrap();
        assert_eq!(&a[col("ABC")], "A");
        assert_eq!(&a[col("lead_time_days")], "3");
        assert_eq!(&a[col("BelowROP")], "true");
        assert_eq!(a[col("annual_qty")].parse::<f64>().unwrap(), 20.0);
        let rop: f64 = a[col("ROP")].parse().unwrap();
        assert!((rop - run.profiles[0].reorder_point).abs() < 1e-9);
    }

    #[test]
    fn alerts_skip_zero_rop_items() {
        let run = sample_run();
        let mut buf = Vec::new();
        write_alerts(&mut buf, &run.alerts).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().next().unwrap().ends_with(",BelowROP,SuggestedOrderQty"));
        // B never moves, so its ROP is 0 and it raises no alert
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("A,"));
    }

    #[test]
    fn no_alerts_writes_empty_file() {
        let mut buf = Vec::new();
        write_alerts(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv_dir = write_run(dir.path(), &sample_run()).unwrap();
        for name in [MASTER_FILE, MONTHLY_FILE, ALERTS_FILE] {
            assert!(csv_dir.join(name).exists(), "{} missing", name);
        }
    }
}
