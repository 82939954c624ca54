//! Runs the batch pipeline against an on-disk fixture file.

use std::fs::File;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{DeductionLimits, TaxCalculator};
use tax_data::{BatchReport, read_inputs, run_batch};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("taxes.csv")
}

fn open_fixture() -> File {
    File::open(fixture_path()).expect("fixture file should open")
}

#[test]
fn fixture_imports_every_row() {
    let rows: Vec<_> = read_inputs(open_fixture())
        .collect::<Result<_, _>>()
        .expect("fixture should import without error");

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[3].input.allowances.len(), 2);
    assert!(rows[4].input.allowances.is_empty());
}

#[test]
fn fixture_results_keep_row_order() {
    let taxes: Vec<(Decimal, Decimal)> = run_batch(
        open_fixture(),
        TaxCalculator::standard(),
        DeductionLimits::default(),
    )
    .map(|line| {
        let line = line.unwrap();
        (line.result.total_tax_due, line.result.refund)
    })
    .collect();

    assert_eq!(
        taxes,
        vec![
            (dec!(29000), dec!(0)),
            (dec!(0), dec!(2000)),
            (dec!(11250), dec!(0)),
            (dec!(975000), dec!(0)),
            (dec!(0.1), dec!(0)),
        ]
    );
}

#[test]
fn fixture_report_serializes_one_entry_per_row() {
    let report = BatchReport::collect(
        open_fixture(),
        TaxCalculator::standard(),
        DeductionLimits::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["taxes"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["taxes"][1]["taxRefund"], serde_json::json!(2000.0));

    for entry in json["taxes"].as_array().unwrap() {
        assert_eq!(entry["taxLevel"].as_array().map(Vec::len), Some(5));
    }
    assert_eq!(
        json["taxes"][3]["taxLevel"],
        serde_json::json!([
            { "level": "0-150,000", "tax": 0.0 },
            { "level": "150,001-500,000", "tax": 35000.0 },
            { "level": "500,001-1,000,000", "tax": 75000.0 },
            { "level": "1,000,001-2,000,000", "tax": 200000.0 },
            { "level": "2,000,001 and above", "tax": 665000.0 }
        ])
    );
}
