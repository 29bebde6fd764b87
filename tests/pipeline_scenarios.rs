//! End-to-end scenarios over the public API.

use abcxyz_policy::classification::abc::classify_abc;
use abcxyz_policy::classification::YearMonth;
use abcxyz_policy::io::{loader, reporting, synthetic};
use abcxyz_policy::{
    logging, AbcClass, ConsumptionRecord, PipelineError, PolicyConfig, PolicyPipeline, PriceEntry,
    Supplier, SupplierResolver, XyzClass,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

const EPS: f64 = 1e-6;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn default_pipeline() -> PolicyPipeline {
    PolicyPipeline::new(
        PolicyConfig::default(),
        SupplierResolver::standard(HashSet::new(), HashSet::new()),
    )
    .unwrap()
}

/// SKU1 = 8000, SKU2 = 1500, SKU3 = 500 over four flat months at price 1.
fn three_sku_records() -> Vec<ConsumptionRecord> {
    let start = YearMonth::new(2024, 1);
    let mut records = Vec::new();
    for (code, monthly) in [("SKU1", 2000.0), ("SKU2", 375.0), ("SKU3", 125.0)] {
        let demand = synthetic::generate_constant_demand(4, monthly);
        records.extend(synthetic::monthly_records(code, start, &demand).unwrap());
    }
    records
}

#[test]
fn three_sku_scenario() {
    logging::init_test();
    let run = default_pipeline().run(&three_sku_records(), &[]).unwrap();

    let by_code: HashMap<&str, _> = run.profiles.iter().map(|p| (p.item_code.as_str(), p)).collect();
    assert_eq!(by_code["SKU1"].abc, AbcClass::A);
    assert_eq!(by_code["SKU2"].abc, AbcClass::B);
    assert_eq!(by_code["SKU3"].abc, AbcClass::C);

    for p in &run.profiles {
        assert_eq!(p.xyz, XyzClass::X);
        assert_eq!(p.supplier, Supplier::Nacional);
        assert_eq!(p.lead_time_days, 3);
        assert_eq!(p.on_hand, 0.0);
        assert!(p.below_rop);
    }

    let sku1 = by_code["SKU1"];
    assert!((sku1.z_level - 1.96).abs() < EPS);
    assert!((sku1.monthly_mean - 2000.0).abs() < EPS);
    assert_eq!(sku1.monthly_std, Some(0.0));
    // flat demand: no safety stock, ROP = 2000/30 * 3
    assert!(sku1.safety_stock.abs() < EPS);
    assert!((sku1.reorder_point - 200.0).abs() < EPS);
    let expected_eoq = (2.0f64 * 8000.0 * 15000.0 / 0.25).sqrt();
    assert!((sku1.eoq - expected_eoq).abs() < EPS);
    assert!((sku1.stock_max - (200.0 + expected_eoq)).abs() < EPS);

    assert_eq!(run.alerts.len(), 3);
    let codes: Vec<_> = run.profiles.iter().map(|p| p.item_code.as_str()).collect();
    assert_eq!(codes, vec!["SKU1", "SKU2", "SKU3"]);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dataset = synthetic::generate_dataset(30, 12, 9).unwrap();
    let pipeline = default_pipeline();

    let render = || {
        let run = pipeline.run(&dataset.consumption, &dataset.prices).unwrap();
        let mut master = Vec::new();
        let mut alerts = Vec::new();
        reporting::write_master(&mut master, &run.profiles).unwrap();
        reporting::write_alerts(&mut alerts, &run.alerts).unwrap();
        (master, alerts)
    };

    assert_eq!(render(), render());
}

#[test]
fn whole_word_heli_rule() {
    let records = vec![
        ConsumptionRecord::new("G1", 10.0, date(1, 1)),
        ConsumptionRecord::new("G2", 10.0, date(1, 1)),
    ];
    let prices = vec![
        PriceEntry::new("G1", "HELICAL GEAR", 3.0),
        PriceEntry::new("G2", "HELI PUMP", 3.0),
    ];
    let run = default_pipeline().run(&records, &prices).unwrap();
    let supplier_of = |code: &str| {
        run.profiles
            .iter()
            .find(|p| p.item_code == code)
            .map(|p| p.supplier)
            .unwrap()
    };
    assert_eq!(supplier_of("G1"), Supplier::Nacional);
    assert_eq!(supplier_of("G2"), Supplier::Heli);
}

#[test]
fn reference_lists_and_lead_time_overrides() {
    let records = vec![
        ConsumptionRecord::new("T1", 9.0, date(2, 1)),
        ConsumptionRecord::new("H1", 9.0, date(2, 1)),
        ConsumptionRecord::new("N1", 9.0, date(2, 1)),
    ];
    let config = PolicyConfig::from_yaml_str("policy:\n  lead_time_by_supplier:\n    tvh: 30\n", "inline").unwrap();
    let resolver = SupplierResolver::standard(
        HashSet::from(["H1".to_string()]),
        HashSet::from(["T1".to_string(), "H1".to_string()]),
    );
    let run = PolicyPipeline::new(config, resolver).unwrap().run(&records, &[]).unwrap();

    let lead: HashMap<&str, (Supplier, u32)> = run
        .profiles
        .iter()
        .map(|p| (p.item_code.as_str(), (p.supplier, p.lead_time_days)))
        .collect();
    assert_eq!(lead["H1"], (Supplier::Heli, 90));
    assert_eq!(lead["T1"], (Supplier::Tvh, 30));
    assert_eq!(lead["N1"], (Supplier::Nacional, 3));
}

#[test]
fn price_catalog_does_not_create_profiles() {
    let records = vec![ConsumptionRecord::new("USED", 1.0, date(3, 3))];
    let prices = vec![
        PriceEntry::new("USED", "Used", 1.0),
        PriceEntry::new("SHELF", "Never moved", 100.0),
    ];
    let run = default_pipeline().run(&records, &prices).unwrap();
    assert!(run.profiles.iter().all(|p| p.item_code != "SHELF"));
    assert!(run.monthly.series("SHELF").is_none());
}

#[test]
fn demand_step_moves_item_out_of_x() {
    // 10 a month, then 40: mean 25, sample std sqrt(270) ~ 16.4, cv ~ 0.66
    let demand = synthetic::generate_step_demand(6, 10.0, 40.0, 3);
    let mut records = synthetic::monthly_records("STEP", YearMonth::new(2024, 1), &demand).unwrap();
    let flat = synthetic::generate_constant_demand(6, 25.0);
    records.extend(synthetic::monthly_records("FLAT", YearMonth::new(2024, 1), &flat).unwrap());

    let run = default_pipeline().run(&records, &[]).unwrap();
    let step = run.profiles.iter().find(|p| p.item_code == "STEP").unwrap();
    let flat = run.profiles.iter().find(|p| p.item_code == "FLAT").unwrap();

    assert_eq!(step.xyz, XyzClass::Y);
    assert_eq!(flat.xyz, XyzClass::X);
    assert!((step.monthly_mean - flat.monthly_mean).abs() < EPS);
    assert!(step.safety_stock > flat.safety_stock);
    assert!(flat.safety_stock.abs() < EPS);
}

#[test]
fn sparse_history_is_z() {
    // Only one month observed: no sample std
    let records = vec![
        ConsumptionRecord::new("ONE", 5.0, date(6, 1)),
        ConsumptionRecord::new("ONE", 5.0, date(6, 20)),
    ];
    let run = default_pipeline().run(&records, &[]).unwrap();
    assert_eq!(run.profiles[0].xyz, XyzClass::Z);
    assert_eq!(run.profiles[0].monthly_std, None);
}

#[test]
fn cumulative_share_properties_hold_on_generated_data() {
    let dataset = synthetic::generate_dataset(50, 12, 3).unwrap();
    let prices: HashMap<String, PriceEntry> = dataset
        .prices
        .iter()
        .map(|p| (p.item_code.clone(), p.clone()))
        .collect();
    let ranks = classify_abc(&dataset.consumption, &prices, (0.80, 0.95));

    for pair in ranks.windows(2) {
        assert!(pair[0].pct <= pair[1].pct);
    }
    assert!((ranks.last().unwrap().pct - 1.0).abs() < 1e-9);
    for r in &ranks {
        if r.pct <= 0.80 {
            assert_eq!(r.class, AbcClass::A);
        }
    }
}

#[test]
fn csv_inputs_to_reports() {
    let movements = "\
Código,Fecha,Cantidad
a1,05/01/2024,10
A1,05/02/2024,12
A1,bad date,99
b2,15/02/2024,3
";
    let prices = "ItemCode,ItemName,AvgPrice\nA1,HELI PUMP,4.5\nB2,Washer,abc\n";

    let consumption = loader::read_consumption(movements.as_bytes(), "salidas.csv").unwrap();
    let price_table = loader::read_prices(prices.as_bytes(), "precios.csv").unwrap();
    assert_eq!(consumption.len(), 3);

    let run = default_pipeline().run(&consumption, &price_table).unwrap();
    let a1 = run.profiles.iter().find(|p| p.item_code == "A1").unwrap();
    assert_eq!(a1.supplier, Supplier::Heli);
    assert!((a1.acv - 22.0 * 4.5).abs() < EPS);
    let b2 = run.profiles.iter().find(|p| p.item_code == "B2").unwrap();
    assert_eq!(b2.unit_cost, 1.0);

    let dir = tempfile::tempdir().unwrap();
    let csv_dir = reporting::write_run(dir.path(), &run).unwrap();
    let monthly = std::fs::read_to_string(csv_dir.join(reporting::MONTHLY_FILE)).unwrap();
    assert_eq!(monthly.lines().next().unwrap(), "item_code,2024-01,2024-02");
}

#[test]
fn empty_after_normalization_fails() {
    let movements = "ItemCode,Fecha,Qty\nA,never,1\n";
    let consumption = loader::read_consumption(movements.as_bytes(), "issues.csv").unwrap();
    let err = default_pipeline().run(&consumption, &[]).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyInput));
}
